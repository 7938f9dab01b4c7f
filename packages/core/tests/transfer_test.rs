//! Cross-board transfer tests
//!
//! Covers the happy path (atomic move, cache reconciliation, destination
//! activation), geometry reassignment at the destination, and the no-op
//! failure path.

mod support;

#[cfg(test)]
mod transfer_tests {
    use crate::support::{board_with_store, flaky_store, seeded_store, OWNER};
    use corkboard_core::models::Position;
    use corkboard_core::services::StoreError;
    use corkboard_core::PersistenceGateway;

    #[tokio::test]
    async fn test_transfer_moves_note_exactly_once() {
        let (mut store, _gateway) = seeded_store();
        let source = board_with_store(&mut store, "Source").await;
        let dest = store.create_board(OWNER, "Dest").await.unwrap();
        let note = store.create_note(OWNER, "Traveler", "").await.unwrap();

        store
            .move_note_to_board(&note.id, &dest.id, Some(Position::new(30.0, 40.0)))
            .await
            .unwrap();

        // gone from the source side
        assert!(store
            .cached_notes(&source.id)
            .unwrap()
            .iter()
            .all(|n| n.id != note.id));

        // present exactly once at the destination, which is now active
        let dest_cache = store.cached_notes(&dest.id).unwrap();
        assert_eq!(
            dest_cache.iter().filter(|n| n.id == note.id).count(),
            1
        );
        assert_eq!(store.active_board_id(), Some(dest.id.as_str()));
        assert_eq!(store.notes().len(), 1);

        let moved = store.note(&note.id).unwrap();
        assert_eq!(moved.board_id, dest.id);
        assert_eq!(moved.position, Position::new(30.0, 40.0));
    }

    #[tokio::test]
    async fn test_transfer_assigns_fresh_tilt_and_top_z() {
        let (mut store, _gateway) = seeded_store();
        board_with_store(&mut store, "Source").await;
        let note = store.create_note(OWNER, "Traveler", "").await.unwrap();

        // populate the destination cache with two notes (z 1 and 2)
        let dest = store.create_board(OWNER, "Dest").await.unwrap();
        store.set_active_board(&dest.id);
        store.load_notes(OWNER, &dest.id, false).await.unwrap();
        store.create_note(OWNER, "One", "").await.unwrap();
        store.create_note(OWNER, "Two", "").await.unwrap();

        store
            .move_note_to_board(&note.id, &dest.id, None)
            .await
            .unwrap();

        let moved = store.note(&note.id).unwrap();
        assert_eq!(moved.z_index, 3, "tops the destination cache");
        assert!(moved.rotation.abs() <= 5.0, "tilt stays in range");
        // synthesized drop position lands in the default drop region
        assert!(moved.position.x >= 0.0 && moved.position.x <= 240.0);
        assert!(moved.position.y >= 0.0 && moved.position.y <= 400.0);
    }

    #[tokio::test]
    async fn test_transfer_to_uncached_board_starts_z_at_one() {
        let (mut store, _gateway) = seeded_store();
        board_with_store(&mut store, "Source").await;
        let note = store.create_note(OWNER, "Traveler", "").await.unwrap();
        let dest = store.create_board(OWNER, "Dest").await.unwrap();

        store
            .move_note_to_board(&note.id, &dest.id, None)
            .await
            .unwrap();

        assert_eq!(store.note(&note.id).unwrap().z_index, 1);
    }

    #[tokio::test]
    async fn test_transfer_drops_stale_dirty_mark() {
        let (mut store, _gateway) = seeded_store();
        board_with_store(&mut store, "Source").await;
        let note = store.create_note(OWNER, "Traveler", "").await.unwrap();
        store.update_note_position(&note.id, Position::new(9.0, 9.0));
        assert!(store.is_dirty(&note.id));

        let dest = store.create_board(OWNER, "Dest").await.unwrap();
        store
            .move_note_to_board(&note.id, &dest.id, None)
            .await
            .unwrap();

        // the move persisted authoritative geometry; nothing left to flush
        assert!(!store.is_dirty(&note.id));
    }

    #[tokio::test]
    async fn test_transfer_failure_is_a_local_noop() {
        let (mut store, gateway) = flaky_store();
        let source = board_with_store(&mut store, "Source").await;
        let dest = store.create_board(OWNER, "Dest").await.unwrap();
        let note = store.create_note(OWNER, "Stuck", "").await.unwrap();

        gateway.fail_on("move_note");
        let result = store
            .move_note_to_board(&note.id, &dest.id, None)
            .await;

        assert!(matches!(result, Err(StoreError::TransferFailed { .. })));
        // prior board assignment stands, locally and persisted
        assert_eq!(store.active_board_id(), Some(source.id.as_str()));
        assert_eq!(store.note(&note.id).unwrap().board_id, source.id);
        assert_eq!(store.cached_notes(&source.id).unwrap().len(), 1);
        assert!(store.cached_notes(&dest.id).is_none());
        let persisted = gateway.get_note_by_id(&note.id).await.unwrap();
        assert_eq!(persisted.board_id, source.id);
        assert!(store.last_error().is_some());
    }

    #[tokio::test]
    async fn test_transfer_switches_live_notes_to_destination_cache() {
        let (mut store, _gateway) = seeded_store();
        board_with_store(&mut store, "Source").await;
        store.create_note(OWNER, "Stays", "").await.unwrap();
        let traveler = store.create_note(OWNER, "Traveler", "").await.unwrap();
        let dest = store.create_board(OWNER, "Dest").await.unwrap();

        store
            .move_note_to_board(&traveler.id, &dest.id, None)
            .await
            .unwrap();

        let titles: Vec<&str> = store.notes().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Traveler"]);
    }
}
