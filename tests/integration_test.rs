// Integration tests for the scheduling session and settings persistence

mod fixtures;

use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use serial_test::serial;
use tempfile::TempDir;

use fixtures::{blocks, id, letter_session, seeded_store};
use timetable_planner::models::block::DayOfWeek;
use timetable_planner::models::settings::Settings;
use timetable_planner::models::targeting::{GridCell, SearchTargeting};
use timetable_planner::services::interaction::{InteractionOutcome, UiEvent};
use timetable_planner::services::schedule::ScheduleError;
use timetable_planner::services::session::{
    CommandOutcome, ScheduleSession, SessionCommand, SessionQueue,
};
use timetable_planner::services::settings::{SettingsService, CONFIG_ENV_VAR};

#[test]
fn test_click_insert_duplicate_remove_walkthrough() {
    let mut session =
        ScheduleSession::from_store(seeded_store(vec![blocks::lecture("Algebra", DayOfWeek::Mon, 2, 2)]));

    // Clicking a block removes every block covering that cell
    let outcome = session
        .apply(UiEvent::BlockClicked {
            table_id: id("A"),
            day: DayOfWeek::Mon,
            time: 2,
        })
        .unwrap();
    assert_eq!(
        outcome,
        InteractionOutcome::BlocksRemoved {
            table_id: id("A"),
            count: 1
        }
    );
    assert!(session.store().collection().get(&id("A")).unwrap().is_empty());

    // Clicking an empty cell opens targeting for that cell
    session
        .apply(UiEvent::EmptyCellClicked {
            table_id: id("A"),
            day: DayOfWeek::Tue,
            time: 5,
        })
        .unwrap();
    assert_eq!(
        session.snapshot().targeting,
        Some(SearchTargeting::for_cell(id("A"), DayOfWeek::Tue, 5))
    );

    // A remove on the only table is ignored and changes nothing
    let version = session.store().version();
    let outcome = session.apply(UiEvent::RemoveClicked(id("A"))).unwrap();
    assert_eq!(outcome, InteractionOutcome::Ignored);
    assert_eq!(session.store().version(), version);
    assert_eq!(session.store().len(), 1);

    // Duplicating an empty table gives two empty tables
    let outcome = session.apply(UiEvent::DuplicateClicked(id("A"))).unwrap();
    assert_eq!(
        outcome,
        InteractionOutcome::TableDuplicated {
            source: id("A"),
            created: id("B")
        }
    );
    let snapshot = session.snapshot();
    let ids: Vec<_> = snapshot.collection.ids().cloned().collect();
    assert_eq!(ids, vec![id("A"), id("B")]);
    assert!(snapshot.collection.tables().iter().all(|table| table.is_empty()));
}

#[test]
fn test_insert_from_dialog_closes_targeting() {
    let mut session = letter_session();
    session.apply(UiEvent::AddScheduleClicked(id("A"))).unwrap();
    assert!(session.targeting().is_open());

    let outcome = session
        .execute(SessionCommand::InsertBlock {
            table_id: id("A"),
            block: blocks::data_structures(),
        })
        .unwrap();
    assert_eq!(outcome, CommandOutcome::BlockInserted(id("A")));
    assert!(!session.targeting().is_open());

    let table = session.store().collection().get(&id("A")).unwrap().clone();
    assert_eq!(table.blocks(), &[blocks::data_structures()]);
}

#[test]
fn test_removing_targeted_table_closes_dialog() {
    let mut session = letter_session();
    session.execute(SessionCommand::CreateTable).unwrap();
    session.apply(UiEvent::AddScheduleClicked(id("B"))).unwrap();

    let outcome = session.apply(UiEvent::RemoveClicked(id("B"))).unwrap();
    assert_eq!(outcome, InteractionOutcome::TableRemoved(id("B")));
    assert_eq!(session.snapshot().targeting, None);
    assert!(!session.store().can_remove_table());
}

#[test]
fn test_failed_commands_leave_version_alone() {
    let mut session = letter_session();
    let before = session.snapshot();

    let err = session
        .execute(SessionCommand::MoveBlock {
            table_id: id("A"),
            index: 0,
            origin: GridCell {
                day: DayOfWeek::Mon,
                time: 1,
            },
            day: DayOfWeek::Fri,
            start: 3,
        })
        .unwrap_err();
    assert!(matches!(err, ScheduleError::BlockIndexOutOfRange { index: 0, len: 0, .. }));

    let err = session
        .execute(SessionCommand::InsertBlock {
            table_id: id("Z"),
            block: blocks::calculus(),
        })
        .unwrap_err();
    assert_eq!(err, ScheduleError::NotFound(id("Z")));

    assert_eq!(session.store().version(), before.collection.version());
}

#[test]
fn test_queued_drag_after_removal_does_not_move_another_block() {
    let mut session = ScheduleSession::from_store(seeded_store(vec![
        blocks::calculus(),
        blocks::data_structures(),
    ]));
    let queue = SessionQueue::new();
    let sender = queue.sender();

    // Both land in the same frame: a click removes Calculus, then the drag of
    // Calculus (captured at index 0) commits
    sender.send(UiEvent::BlockClicked {
        table_id: id("A"),
        day: DayOfWeek::Mon,
        time: 1,
    });
    sender.send(SessionCommand::MoveBlock {
        table_id: id("A"),
        index: 0,
        origin: GridCell {
            day: DayOfWeek::Mon,
            time: 1,
        },
        day: DayOfWeek::Fri,
        start: 5,
    });

    let results = session.drain(&queue);
    assert!(results[0].is_ok());
    assert!(matches!(
        results[1],
        Err(ScheduleError::StaleBlock { index: 0, .. })
    ));
    assert_eq!(
        session.store().collection().get(&id("A")).unwrap().blocks(),
        &[blocks::data_structures()]
    );
}

#[test]
fn test_drag_past_last_slot_is_rejected() {
    let mut session = ScheduleSession::from_store(seeded_store(vec![blocks::calculus()]));
    let version = session.store().version();

    let err = session
        .execute(SessionCommand::MoveBlock {
            table_id: id("A"),
            index: 0,
            origin: GridCell {
                day: DayOfWeek::Mon,
                time: 1,
            },
            day: DayOfWeek::Tue,
            start: u32::MAX,
        })
        .unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidBlock(_)));
    assert_eq!(session.store().version(), version);
}

#[test]
fn test_snapshots_survive_later_mutations() {
    let mut session = letter_session();
    let before = session.snapshot();

    session
        .execute(SessionCommand::InsertBlock {
            table_id: id("A"),
            block: blocks::calculus(),
        })
        .unwrap();
    session
        .execute(SessionCommand::MoveBlock {
            table_id: id("A"),
            index: 0,
            origin: GridCell {
                day: DayOfWeek::Mon,
                time: 1,
            },
            day: DayOfWeek::Thu,
            start: 7,
        })
        .unwrap();

    assert!(before.collection.get(&id("A")).unwrap().is_empty());
    let after = session.snapshot();
    assert!(!Arc::ptr_eq(&before.collection, &after.collection));
    let moved = &after.collection.get(&id("A")).unwrap().blocks()[0];
    assert_eq!(moved.day, DayOfWeek::Thu);
    assert_eq!(moved.range.slots(), &[7, 8]);
}

#[test]
fn test_commands_from_worker_thread_apply_in_order() {
    let mut session = letter_session();
    let queue = SessionQueue::new();
    let sender = queue.sender();

    let worker = thread::spawn(move || {
        sender.send(SessionCommand::CreateTable);
        sender.send(SessionCommand::InsertBlock {
            table_id: id("B"),
            block: blocks::physics_lab(),
        });
        sender.send(UiEvent::DuplicateClicked(id("B")));
    });
    worker.join().unwrap();

    let results = session.drain(&queue);
    assert_eq!(
        results,
        vec![
            Ok(CommandOutcome::TableCreated(id("B"))),
            Ok(CommandOutcome::BlockInserted(id("B"))),
            Ok(CommandOutcome::Interaction(InteractionOutcome::TableDuplicated {
                source: id("B"),
                created: id("C"),
            })),
        ]
    );
    assert_eq!(
        session.store().collection().get(&id("C")).unwrap().blocks(),
        &[blocks::physics_lab()]
    );
    assert!(session.drain(&queue).is_empty());
}

#[test]
fn test_settings_persistence() {
    let dir = TempDir::new().unwrap();
    let service = SettingsService::new(dir.path().join("nested").join("settings.toml"));

    // Missing file gives defaults
    let mut settings = service.load().unwrap();
    assert_eq!(settings, Settings::default());

    settings.theme = "dark".to_string();
    settings.days = vec![DayOfWeek::Mon, DayOfWeek::Wed, DayOfWeek::Fri];
    settings.slot_count = 12;
    service.save(&settings).unwrap();

    let loaded = service.load().unwrap();
    assert_eq!(loaded, settings);
    assert_eq!(loaded.slot_label(12), "14:30~15:00");
}

#[test]
#[serial]
fn test_config_env_var_overrides_location() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    std::env::set_var(CONFIG_ENV_VAR, &path);

    let service = SettingsService::from_environment().unwrap();
    std::env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(service.path(), path.as_path());
}
