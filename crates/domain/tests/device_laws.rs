//! Behavioural laws every device type must obey, checked against the
//! built-in switch and light.

use hubkit_domain::devices::{light, switch};
use hubkit_domain::devices::{LightState, SwitchState};
use hubkit_domain::entity::Entity;
use hubkit_domain::error::{HubError, ValidationError};
use hubkit_domain::payload::{Command, Event};
use hubkit_domain::schema::DeviceSchema;
use serde_json::json;

fn light_entity() -> Entity {
    Entity::builder()
        .id("light.living_room")
        .domain(light::DOMAIN)
        .build()
        .unwrap()
}

fn switch_entity() -> Entity {
    Entity::builder()
        .id("switch.porch")
        .domain(switch::DOMAIN)
        .build()
        .unwrap()
}

fn snapshot(entity: &Entity) -> (Option<String>, Option<String>, Option<String>, Vec<String>) {
    let blob = |slot: &Option<Box<serde_json::value::RawValue>>| {
        slot.as_ref().map(|raw| raw.get().to_string())
    };
    (
        blob(&entity.data.desired),
        blob(&entity.data.reported),
        blob(&entity.data.effective),
        entity.actions.clone(),
    )
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn should_accept_bare_command_iff_action_needs_no_fields() {
    let cases: [(&DeviceSchema, &[&str]); 2] = [
        (&switch::SCHEMA, &["turn_on", "turn_off"]),
        (&light::SCHEMA, &["turn_on", "turn_off"]),
    ];
    for (schema, bare) in cases {
        for action in schema.actions {
            let result = schema.validate_command(&Command::new(action.name));
            assert_eq!(
                result.is_ok(),
                bare.contains(&action.name),
                "{}.{}",
                schema.domain,
                action.name
            );
        }
        assert!(schema.validate_command(&Command::new("reboot")).is_err());
    }
}

#[test]
fn should_accept_complete_light_commands() {
    let complete = [
        json!({"type": "set_brightness", "brightness": 100}),
        json!({"type": "set_rgb", "rgb": [0, 0, 0]}),
        json!({"type": "set_temperature", "temperature": 0}),
        json!({"type": "set_scene", "scene": "focus"}),
    ];
    for payload in complete {
        let raw = serde_json::to_vec(&payload).unwrap();
        assert!(light::parse_command(&raw).is_ok(), "{payload}");
    }
}

#[test]
fn should_never_mutate_entity_while_parsing() {
    let mut entity = light_entity();
    light::bind(&mut entity).set_brightness(10).unwrap();
    let before = snapshot(&entity);

    let _ = light::parse_command(br#"{"type":"set_brightness","brightness":90}"#);
    let _ = light::parse_event(br#"{"type":"set_scene","scene":"x"}"#);
    let _ = light::parse_command(br#"{"type":"nope"}"#);

    assert_eq!(snapshot(&entity), before);
}

// ---------------------------------------------------------------------------
// Merge semantics
// ---------------------------------------------------------------------------

#[test]
fn should_be_idempotent_when_same_command_applied_twice() {
    let mut once = light_entity();
    let mut twice = light_entity();
    let cmd = Command::new("set_rgb").with_field("rgb", json!([9, 8, 7]));

    light::bind(&mut once).set_desired_from_command(&cmd).unwrap();
    let mut store = light::bind(&mut twice);
    store.set_desired_from_command(&cmd).unwrap();
    store.set_desired_from_command(&cmd).unwrap();

    assert_eq!(snapshot(&once), snapshot(&twice));
}

#[test]
fn should_keep_unrelated_attributes_when_merging_commands() {
    let mut entity = light_entity();
    let mut store = light::bind(&mut entity);
    store.set_brightness(50).unwrap();
    store.set_rgb(1, 2, 3).unwrap();

    let desired = store.desired().unwrap();
    assert_eq!(desired.brightness, Some(50));
    assert_eq!(desired.rgb, Some(vec![1, 2, 3]));
}

#[test]
fn should_keep_unreported_attributes_when_merging_partial_event() {
    let mut entity = light_entity();
    let mut store = light::bind(&mut entity);
    store.set_reported_from_event(&Event::new("turn_on")).unwrap();
    store
        .set_reported_from_event(&Event::new("set_rgb").with_field("rgb", json!([10, 10, 10])))
        .unwrap();

    let event = light::parse_event(br#"{"type":"set_brightness","brightness":80}"#).unwrap();
    let reported = store.set_reported_from_event(&event).unwrap();

    assert_eq!(
        reported,
        LightState {
            power: true,
            brightness: Some(80),
            rgb: Some(vec![10, 10, 10]),
            ..LightState::default()
        }
    );
}

#[test]
fn should_make_effective_equal_reported_after_every_event() {
    let events = [
        Event::new("turn_on"),
        Event::new("set_temperature").with_field("temperature", 4000),
        Event::new("set_scene"),
        Event::new("turn_off").with_cause("schedule"),
    ];
    let mut entity = light_entity();
    let mut store = light::bind(&mut entity);
    for event in &events {
        store.set_reported_from_event(event).unwrap();
        assert_eq!(store.reported().unwrap(), store.effective().unwrap());
    }
}

#[test]
fn should_not_touch_desired_when_events_arrive() {
    let mut entity = switch_entity();
    let mut store = switch::bind(&mut entity);
    store.turn_off().unwrap();
    store.set_reported_from_event(&Event::new("turn_on")).unwrap();

    assert_eq!(store.desired().unwrap(), SwitchState { power: false });
    assert_eq!(store.reported().unwrap(), SwitchState { power: true });
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn should_fill_switch_actions_once_and_respect_external_changes() {
    let mut entity = switch_entity();
    switch::bind(&mut entity).ensure_default_actions();
    assert_eq!(entity.actions, vec!["turn_on", "turn_off"]);

    switch::bind(&mut entity).ensure_default_actions();
    assert_eq!(entity.actions, vec!["turn_on", "turn_off"]);

    entity.actions = vec!["turn_on".to_string()];
    switch::bind(&mut entity).ensure_default_actions();
    assert_eq!(entity.actions, vec!["turn_on"]);
}

#[test]
fn should_reject_short_rgb_and_keep_previous_desired_state() {
    let mut entity = light_entity();
    light::bind(&mut entity).set_brightness(20).unwrap();
    let before = snapshot(&entity);

    let err = light::parse_command(br#"{"type":"set_rgb","rgb":[1,2]}"#).unwrap_err();
    assert!(matches!(
        err,
        HubError::Validation(ValidationError::FieldConstraint { field: "rgb", .. })
    ));

    let unchecked = Command::new("set_rgb").with_field("rgb", json!([1, 2]));
    assert!(
        light::bind(&mut entity)
            .set_desired_from_command(&unchecked)
            .is_err()
    );
    assert_eq!(snapshot(&entity), before);
}

#[test]
fn should_recover_light_with_corrupted_desired_blob() {
    let mut entity = light_entity();
    entity.data.desired = Some(
        serde_json::value::RawValue::from_string(
            r#"{"power":true,"brightness":"high"}"#.to_string(),
        )
        .unwrap(),
    );
    let mut store = light::bind(&mut entity);
    assert!(matches!(store.desired(), Err(HubError::Decode { .. })));

    let state = store.set_brightness(40).unwrap();
    assert_eq!(
        state,
        LightState {
            brightness: Some(40),
            ..LightState::default()
        }
    );
    let state = store.turn_off().unwrap();
    assert_eq!(state.brightness, Some(40));
    assert_eq!(store.desired().unwrap(), state);
}

#[test]
fn should_keep_every_slot_when_light_event_fails_to_merge() {
    let mut entity = light_entity();
    let mut store = light::bind(&mut entity);
    store.set_scene("reading").unwrap();
    store
        .set_reported_from_event(&Event::new("set_brightness").with_field("brightness", 60))
        .unwrap();
    let before = snapshot(&entity);

    let mistyped = Event::new("set_brightness").with_field("brightness", "x");
    let err = light::bind(&mut entity)
        .set_reported_from_event(&mistyped)
        .unwrap_err();

    assert!(matches!(err, HubError::Decode { domain: "light", .. }));
    assert_eq!(snapshot(&entity), before);
}

#[test]
fn should_decode_never_written_desired_as_zero_state() {
    let mut entity = light_entity();
    let desired = light::bind(&mut entity).desired().unwrap();
    assert_eq!(desired, LightState::default());
    assert!(!desired.power);
    assert!(desired.brightness.is_none());
    assert!(desired.rgb.is_none());
    assert!(desired.temperature.is_none());
    assert!(desired.scene.is_none());
}
