//! Shared story and helpers for the integration tests.
#![allow(dead_code)]

use loom_engine::property::{
    Interaction, MOVABLE, MovableOptions, TALKABLE, TalkableOptions, USABLE_WITH,
    UsableWithOptions,
};
use loom_engine::{ActionSpec, Engine, EntityDef, Handle, LocationDef, Overridable, StoryDef};

/// A small adventure exercising every standard property.
pub fn adventure() -> StoryDef {
    StoryDef::new("My adventure")
        .with_initial_text("Here the adventure begins")
        .with_score(0)
        .with_var("var3", 3)
        .with_location(
            LocationDef::new("location1", "Initial location")
                .initial()
                .with_description("Wow, such a beautiful location")
                .with_exit("North", "location2")
                .with_exit("South", "A message, not a location")
                .with_action("Wait", "I am waiting")
                .with_action(
                    "Teleport",
                    ActionSpec::computed(|engine| {
                        engine.go_to("location2");
                        "Teleported".to_string()
                    }),
                )
                .with_var("var1", 1),
        )
        .with_location(LocationDef::new("location2", "Second location").with_exit("Back", "location1"))
        .with_entity(
            EntityDef::new("object1", "Object 1")
                .at("location1")
                .with_action(
                    "Examine",
                    ActionSpec::new("examined")
                        .with_command("examining")
                        .with_before(|engine| engine.print("before text"))
                        .with_after(|engine| engine.print("after text")),
                )
                .with_action("Read", ActionSpec::new("read").with_command("reading"))
                .with_var("var2", 2)
                .with_property(
                    MOVABLE,
                    MovableOptions::new()
                        .with_object_name("the object")
                        .with_before(|engine| engine.print("before move"))
                        .with_after(|engine| engine.print("after move")),
                )
                .with_property(
                    USABLE_WITH,
                    UsableWithOptions::new().with_using_text("using object 1, yeah!"),
                )
                .with_property(
                    TALKABLE,
                    TalkableOptions::new().with_topic("Weather", "Wow, it rains!"),
                ),
        )
        .with_entity(
            EntityDef::new("object2", "Object 2")
                .at("location1")
                .with_property(
                    MOVABLE,
                    MovableOptions::new()
                        .with_take_command("take it!")
                        .with_drop_command("drop it!"),
                )
                .with_property(
                    USABLE_WITH,
                    UsableWithOptions::new()
                        .with_title("Object 2 Use With")
                        .with_command("you try to use Object 2")
                        .with_interaction(
                            "object3",
                            Interaction::new("used with object 3").with_command("use with object 3"),
                        )
                        .with_default_text("Default action"),
                ),
        )
        .with_entity(
            EntityDef::new("object3", "Object 3")
                .at("location1")
                .with_property(MOVABLE, MovableOptions::new())
                .with_property(
                    USABLE_WITH,
                    UsableWithOptions::new()
                        .with_object_name("object 3")
                        .with_interaction("object1", "used with object 1")
                        .with_interaction(
                            "object2",
                            Interaction::default().with_command("use with object 2"),
                        ),
                ),
        )
}

/// Build and start a story with the default configuration.
pub fn start(story: StoryDef) -> Engine {
    let mut engine = Engine::with_defaults(story).unwrap();
    engine.start().unwrap();
    engine
}

/// The log as `(text, type)` pairs.
pub fn log(engine: &Engine) -> Vec<(String, String)> {
    engine
        .log()
        .entries()
        .iter()
        .map(|e| (e.text.clone(), e.kind.to_string()))
        .collect()
}

/// Shorthand for expected log lines.
pub fn lines(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(text, kind)| (text.to_string(), kind.to_string()))
        .collect()
}

/// The log entries appended since `from`.
pub fn log_since(engine: &Engine, from: usize) -> Vec<(String, String)> {
    log(engine).split_off(from)
}

/// Take an offered exit by name.
pub fn exit(engine: &mut Engine, name: &str) {
    let handle = engine.view().exit(name).unwrap();
    engine.invoke(handle).unwrap();
}

/// Invoke an offered location or global action by name.
pub fn action(engine: &mut Engine, name: &str) {
    let handle = engine.view().action(name).unwrap();
    engine.invoke(handle).unwrap();
}

/// Invoke an offered entity action by name.
pub fn entity_action(engine: &mut Engine, entity: &str, name: &str) {
    let handle = engine.view().entity_action(entity, name).unwrap();
    engine.invoke(handle).unwrap();
}

/// Invoke an offered modal action by name.
pub fn modal_action(engine: &mut Engine, name: &str) {
    let handle = engine.view().modal_action(name).unwrap();
    engine.invoke(handle).unwrap();
}

/// Names of the actions an entity currently offers.
pub fn entity_actions(engine: &Engine, entity: &str) -> Vec<String> {
    engine
        .view()
        .entity(entity)
        .map(|e| e.actions.iter().map(|a| a.name.clone()).collect())
        .unwrap_or_default()
}

/// Every handle the current view offers, in display order.
pub fn all_handles(engine: &Engine) -> Vec<Handle> {
    let view = engine.view();
    let mut handles: Vec<Handle> = view.main.exits.iter().map(|a| a.handle).collect();
    handles.extend(view.main.actions.iter().map(|a| a.handle));
    for entity in view.main.entities.iter().chain(&view.inventory.entities) {
        handles.extend(entity.actions.iter().map(|a| a.handle));
    }
    if let Some(modal) = &view.modal {
        handles.extend(modal.actions.iter().map(|a| a.handle));
    }
    handles
}
