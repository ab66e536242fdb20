//! Tests for #[derive(Action)] macro

use sipk_core::action::Action;
use sipk_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum RoomAction {
    #[command]
    ReserveRoom {
        room: String,
    },

    #[command]
    ReleaseAll,

    #[event]
    RoomReserved {
        room: String,
        by: String,
    },

    #[event]
    RoomReleased(usize),

    Refresh,
}

#[test]
fn test_is_command() {
    let action = RoomAction::ReserveRoom {
        room: "Lab-201".to_string(),
    };
    assert!(action.is_command());
    assert!(!action.is_event());
}

#[test]
fn test_is_event() {
    let action = RoomAction::RoomReserved {
        room: "Lab-201".to_string(),
        by: "2201".to_string(),
    };
    assert!(!action.is_command());
    assert!(action.is_event());
}

#[test]
fn test_event_type() {
    let action = RoomAction::RoomReleased(3);
    assert_eq!(action.event_type(), "RoomReleased.v1");
}

#[test]
fn test_command_event_type() {
    let action = RoomAction::ReleaseAll;
    // Commands don't have event types
    assert_eq!(action.event_type(), "unknown");
}

#[test]
fn test_names_do_not_include_fields() {
    let action = RoomAction::ReserveRoom {
        room: "secret-room".to_string(),
    };
    assert_eq!(action.name(), "ReserveRoom");
    assert_eq!(RoomAction::RoomReleased(1).name(), "RoomReleased");
    assert_eq!(RoomAction::Refresh.name(), "Refresh");
}

#[test]
fn test_unmarked_variant_is_neither() {
    let action = RoomAction::Refresh;
    assert!(!action.is_command());
    assert!(!action.is_event());
    assert_eq!(action.event_type(), "unknown");
}

#[test]
fn test_usable_through_trait_object() {
    let actions: Vec<Box<dyn Action>> = vec![
        Box::new(RoomAction::ReleaseAll),
        Box::new(RoomAction::RoomReleased(0)),
    ];

    let names: Vec<_> = actions.iter().map(|a| a.name()).collect();
    assert_eq!(names, ["ReleaseAll", "RoomReleased"]);
}
