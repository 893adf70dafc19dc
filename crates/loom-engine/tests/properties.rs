//! Standard property handlers driven through the engine.

mod common;

use common::*;
use loom_engine::property::{
    CHANGEABLE_STATE, ChangeableStateOptions, PropertyTarget, StateDef, TALKABLE, TalkableOptions,
    Topic, USABLE_WITH, UsableWithOptions,
};
use loom_engine::{
    ActionSpec, ConfigResult, Engine, EngineConfig, EntityDef, LocationDef, Locale, OutputKind,
    Overridable, PropertyHandler, PropertyOptions, StoryDef, Value,
};
use serde_json::json;

#[test]
fn take_and_drop_in_every_flavour() {
    let mut engine = start(adventure());
    assert!(engine.view().inventory.entities.is_empty());

    entity_action(&mut engine, "object1", "Take");
    entity_action(&mut engine, "object2", "Take");
    entity_action(&mut engine, "object3", "Take");
    assert_eq!(engine.view().inventory.entities.len(), 3);
    assert_eq!(
        entity_actions(&engine, "object1"),
        ["Examine", "Read", "Drop", "Use with", "Talk"]
    );

    entity_action(&mut engine, "object1", "Drop");
    entity_action(&mut engine, "object2", "Drop");
    entity_action(&mut engine, "object3", "Drop");
    assert_eq!(
        log_since(&engine, 1),
        lines(&[
            ("take the object", "command"),
            ("before move", "normal"),
            ("Taken", "normal"),
            ("after move", "normal"),
            ("take it!", "command"),
            ("Taken", "normal"),
            ("take", "command"),
            ("Taken", "normal"),
            ("drop the object", "command"),
            ("before move", "normal"),
            ("Dropped", "normal"),
            ("after move", "normal"),
            ("drop it!", "command"),
            ("Dropped", "normal"),
            ("drop", "command"),
            ("Dropped", "normal"),
        ])
    );
    assert!(engine.view().inventory.entities.is_empty());
}

#[test]
fn dropping_leaves_the_object_where_the_player_stands() {
    let mut engine = start(adventure());
    entity_action(&mut engine, "object3", "Take");
    exit(&mut engine, "North");
    entity_action(&mut engine, "object3", "Drop");

    assert_eq!(
        engine.entity_placement("object3"),
        Some(&loom_engine::Placement::at("location2"))
    );
    assert_eq!(engine.view().main.entities[0].name, "Object 3");
}

#[test]
fn using_an_object_with_nothing_in_reach() {
    let story = StoryDef::new("Test")
        .with_location(LocationDef::new("cell", "Cell").initial())
        .with_entity(
            EntityDef::new("key", "Key").with_property(USABLE_WITH, UsableWithOptions::new()),
        )
        .with_inventory("key");
    let mut engine = start(story);

    entity_action(&mut engine, "key", "Use with");
    assert!(!engine.is_locked());
    assert!(engine.view().modal.is_none());
    assert_eq!(
        log(&engine),
        lines(&[("use", "command"), ("Nothing happens", "normal")])
    );
    assert_eq!(entity_actions(&engine, "key"), ["Use with"]);
}

#[test]
fn using_objects_with_each_other() {
    let mut engine = start(adventure());
    entity_action(&mut engine, "object1", "Take");
    let after_take = engine.log().len();

    let view = engine.view();
    assert!(!view.locked);
    assert_eq!(view.action_names().len(), 2);
    assert_eq!(view.exit_names().len(), 2);
    assert_eq!(entity_actions(&engine, "object2"), ["Take"]);

    entity_action(&mut engine, "object1", "Use with");
    let view = engine.view();
    assert!(view.locked);
    assert_eq!(
        view.modal.as_ref().and_then(|m| m.title.as_deref()),
        Some("Use with")
    );
    assert_eq!(view.modal_action_names(), ["Object 2", "Object 3"]);
    assert!(view.main.actions.is_empty());
    assert!(view.main.exits.is_empty());
    assert!(entity_actions(&engine, "object2").is_empty());
    assert!(entity_actions(&engine, "object1").is_empty());

    modal_action(&mut engine, "Object 2");
    assert!(!engine.is_locked());

    entity_action(&mut engine, "object2", "Take");
    entity_action(&mut engine, "object2", "Use with");
    let view = engine.view();
    assert_eq!(
        view.modal.as_ref().and_then(|m| m.title.as_deref()),
        Some("Object 2 Use With")
    );
    // Entities here first, then the rest of the inventory.
    assert_eq!(view.modal_action_names(), ["Object 3", "Object 1"]);
    modal_action(&mut engine, "Object 3");
    entity_action(&mut engine, "object2", "Use with");
    modal_action(&mut engine, "Object 1");

    entity_action(&mut engine, "object3", "Take");
    entity_action(&mut engine, "object3", "Use with");
    modal_action(&mut engine, "Object 1");
    entity_action(&mut engine, "object3", "Use with");
    modal_action(&mut engine, "Object 2");

    assert_eq!(
        log_since(&engine, after_take),
        lines(&[
            ("use", "command"),
            ("using object 1, yeah!", "normal"),
            ("use Object 1 with Object 2", "command"),
            ("Nothing happens", "normal"),
            ("take it!", "command"),
            ("Taken", "normal"),
            ("you try to use Object 2", "command"),
            ("using", "normal"),
            ("use with object 3", "command"),
            ("used with object 3", "normal"),
            ("you try to use Object 2", "command"),
            ("using", "normal"),
            ("use Object 2 with Object 1", "command"),
            ("Default action", "normal"),
            ("take", "command"),
            ("Taken", "normal"),
            ("use object 3", "command"),
            ("using", "normal"),
            ("use Object 3 with Object 1", "command"),
            ("used with object 1", "normal"),
            ("use object 3", "command"),
            ("using", "normal"),
            ("use with object 2", "command"),
            ("Nothing happens", "normal"),
        ])
    );
    assert!(!engine.is_locked());
}

#[test]
fn talking_with_default_options() {
    let mut engine = start(adventure());

    entity_action(&mut engine, "object1", "Talk");
    let view = engine.view();
    assert!(view.locked);
    assert!(view.main.actions.is_empty());
    assert!(view.main.exits.is_empty());
    assert!(entity_actions(&engine, "object1").is_empty());
    assert_eq!(view.modal_action_names(), ["Weather", "Done"]);

    modal_action(&mut engine, "Weather");
    assert!(engine.is_locked());
    modal_action(&mut engine, "Done");
    assert!(!engine.is_locked());
    assert!(!engine.view().main.actions.is_empty());
    assert!(!engine.view().main.exits.is_empty());

    assert_eq!(
        log_since(&engine, 1),
        lines(&[
            ("talk", "command"),
            ("talking", "normal"),
            ("talk about Weather", "command"),
            ("Wow, it rains!", "normal"),
            ("end conversation", "command"),
        ])
    );
}

fn talking_object(options: TalkableOptions) -> StoryDef {
    StoryDef::new("Test")
        .with_location(LocationDef::new("room", "Room").initial())
        .with_entity(
            EntityDef::new("radio", "Radio")
                .at("room")
                .with_property(TALKABLE, options),
        )
}

#[test]
fn talking_with_custom_options() {
    let options = TalkableOptions::new()
        .with_object_name("the talking object")
        .with_topic(
            "Weather",
            Topic::new("Wow, it rains!")
                .with_command("you ask about the weather")
                .with_kind(OutputKind::Dialogue),
        )
        .with_done_name("Done button")
        .with_done_command("suddenly end the conversation")
        .with_done_text("You are tired of talking. Bye!")
        .with_title("Strange, but talking with an object")
        .with_talking_text("... talking softly ...");
    let mut engine = start(talking_object(options));
    assert!(engine.log().is_empty());

    entity_action(&mut engine, "radio", "Talk");
    let view = engine.view();
    assert_eq!(view.modal_action_names(), ["Weather", "Done button"]);
    assert_eq!(
        view.modal.as_ref().and_then(|m| m.title.as_deref()),
        Some("Strange, but talking with an object")
    );

    modal_action(&mut engine, "Weather");
    modal_action(&mut engine, "Done button");
    assert_eq!(
        log(&engine),
        lines(&[
            ("talk to the talking object", "command"),
            ("... talking softly ...", "normal"),
            ("you ask about the weather", "command"),
            ("Wow, it rains!", "dialogue"),
            ("suddenly end the conversation", "command"),
            ("You are tired of talking. Bye!", "normal"),
        ])
    );
    assert!(!engine.is_locked());
}

#[test]
fn unavailable_topics_are_not_offered() {
    let options = TalkableOptions::new()
        .with_topic("Weather", Topic::new("Rain.").with_available(false))
        .with_topic(
            "Secret",
            Topic::new("Psst.").available_when(|e| e.var("trusted").is_some()),
        );
    let mut engine = start(talking_object(options));

    entity_action(&mut engine, "radio", "Talk");
    assert_eq!(engine.view().modal_action_names(), ["Done"]);
    modal_action(&mut engine, "Done");

    engine.set_var("trusted", true);
    entity_action(&mut engine, "radio", "Talk");
    assert_eq!(engine.view().modal_action_names(), ["Secret", "Done"]);
}

fn lamp(options: ChangeableStateOptions) -> StoryDef {
    StoryDef::new("Test")
        .with_location(LocationDef::new("room", "Room").initial())
        .with_entity(
            EntityDef::new("object4", "Object 4")
                .at("room")
                .with_property(CHANGEABLE_STATE, options),
        )
}

fn three_states() -> ChangeableStateOptions {
    ChangeableStateOptions::new([
        StateDef::new("State 1")
            .with_command("change state")
            .with_text("changed to state 1"),
        StateDef::new("State 2").with_text("changed to state 2"),
        StateDef::new("State 3").with_command("change state"),
    ])
    .with_text("generic text")
    .with_command("generic command")
}

#[test]
fn cycling_through_states() {
    let options = three_states().before_state_change(|engine, _next, _previous| {
        engine.print("about to change state...");
        None
    });
    let mut engine = start(lamp(options));
    assert_eq!(entity_actions(&engine, "object4"), ["State 1"]);

    entity_action(&mut engine, "object4", "State 1");
    assert_eq!(entity_actions(&engine, "object4"), ["State 2"]);
    entity_action(&mut engine, "object4", "State 2");
    assert_eq!(entity_actions(&engine, "object4"), ["State 3"]);
    entity_action(&mut engine, "object4", "State 3");
    assert_eq!(entity_actions(&engine, "object4"), ["State 1"]);

    assert_eq!(
        log(&engine),
        lines(&[
            ("change state", "command"),
            ("about to change state...", "normal"),
            ("changed to state 2", "normal"),
            ("generic command", "command"),
            ("about to change state...", "normal"),
            ("generic text", "normal"),
            ("change state", "command"),
            ("about to change state...", "normal"),
            ("changed to state 1", "normal"),
        ])
    );
    assert_eq!(engine.entity_var("object4", "state"), Some(&json!(0)));
}

#[test]
fn state_change_hook_may_redirect() {
    let options = three_states().before_state_change(|_, next, _| match next {
        1 => Some(2),
        _ => Some(99),
    });
    let mut engine = start(lamp(options));

    entity_action(&mut engine, "object4", "State 1");
    assert_eq!(entity_actions(&engine, "object4"), ["State 3"]);
    assert_eq!(engine.log().last().map(|e| e.text.as_str()), Some("generic text"));

    // Out-of-range requests are ignored.
    entity_action(&mut engine, "object4", "State 3");
    assert_eq!(entity_actions(&engine, "object4"), ["State 1"]);
}

#[test]
fn state_is_kept_in_an_entity_variable() {
    let mut engine = start(lamp(three_states().with_state_var("mode")));
    engine.set_entity_var("object4", "mode", 2);
    assert_eq!(entity_actions(&engine, "object4"), ["State 3"]);

    entity_action(&mut engine, "object4", "State 3");
    assert_eq!(engine.entity_var("object4", "mode"), Some(&Value::from(0)));
}

#[test]
fn out_of_range_state_wraps_around() {
    let mut engine = start(lamp(three_states()));
    engine.set_entity_var("object4", "state", 5);
    assert_eq!(entity_actions(&engine, "object4"), ["State 3"]);

    entity_action(&mut engine, "object4", "State 3");
    assert_eq!(engine.entity_var("object4", "state"), Some(&json!(0)));
    assert_eq!(entity_actions(&engine, "object4"), ["State 1"]);
}

#[test]
fn authored_actions_are_not_replaced() {
    let story = StoryDef::new("Test")
        .with_location(LocationDef::new("room", "Room").initial())
        .with_entity(
            EntityDef::new("anvil", "Anvil")
                .at("room")
                .with_action("Take", "It is far too heavy.")
                .with_property(loom_engine::property::MOVABLE, loom_engine::property::MovableOptions::new()),
        );
    let mut engine = start(story);
    entity_action(&mut engine, "anvil", "Take");
    assert!(!engine.is_in_inventory("anvil"));
    assert_eq!(
        log(&engine),
        lines(&[("take", "command"), ("It is far too heavy.", "normal")])
    );
}

struct Knock;

impl PropertyHandler for Knock {
    fn apply(
        &self,
        target: &mut PropertyTarget<'_>,
        options: &PropertyOptions,
        _locale: &Locale,
    ) -> ConfigResult<()> {
        let times = *options
            .downcast::<u32>()
            .ok_or_else(|| target.invalid("knockable", "expected a count"))?;
        let name = target.name.to_string();
        target.add_action(
            "Knock",
            ActionSpec::computed(move |engine| {
                let knocks = engine.var("knocks").and_then(Value::as_u64).unwrap_or(0) + 1;
                engine.set_var("knocks", knocks);
                format!("You knock on the {} {} times.", name.to_lowercase(), times)
            }),
        );
        Ok(())
    }
}

#[test]
fn custom_handlers_extend_locations_and_entities() {
    let story = StoryDef::new("Test").with_location(
        LocationDef::new("porch", "Porch")
            .initial()
            .with_property("knockable", PropertyOptions::custom(3_u32)),
    );
    let config = EngineConfig::default().with_property("knockable", Knock);
    let mut engine = Engine::new(story, config).unwrap();
    engine.start().unwrap();

    assert_eq!(engine.view().action_names(), ["Knock"]);
    action(&mut engine, "Knock");
    assert_eq!(
        log(&engine),
        lines(&[
            ("knock", "command"),
            ("You knock on the porch 3 times.", "normal"),
        ])
    );
    assert_eq!(engine.var("knocks"), Some(&json!(1)));
}

#[test]
fn italian_locale_changes_generated_texts() {
    let story = StoryDef::new("Test")
        .with_location(LocationDef::new("room", "Stanza").initial())
        .with_entity(
            EntityDef::new("coin", "Moneta")
                .at("room")
                .with_property(loom_engine::property::MOVABLE, loom_engine::property::MovableOptions::new()),
        );
    let mut engine = Engine::new(story, EngineConfig::for_language("it").unwrap()).unwrap();
    engine.start().unwrap();

    entity_action(&mut engine, "coin", "Prendi");
    assert_eq!(
        log(&engine),
        lines(&[("prendi", "command"), ("Preso", "normal")])
    );
    assert_eq!(entity_actions(&engine, "coin"), ["Lascia"]);
}
