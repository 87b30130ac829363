use runchart::ChartError;
use runchart::core::{
    ConfigClass, ConfigEntry, ConfigSet, ConfigValue, RenderedValue, SelectionEvent,
    SelectionState, render_config_value,
};

fn entry(key: &str, computed: ConfigValue) -> ConfigEntry {
    ConfigEntry {
        key: key.to_owned(),
        name: key.rsplit('.').next().unwrap_or(key).to_owned(),
        computed,
        value: None,
        other_options: Vec::new(),
        order: 0,
        is_meta: false,
        is_custom: false,
        is_only_option: false,
        is_hyperparam: false,
        is_explicitly_specified: false,
        is_default: false,
        selection: SelectionState::Unselected,
    }
}

fn sample_set() -> ConfigSet {
    let mut model = entry("model", ConfigValue::Text("Transformer".to_owned()));
    model.is_default = true;
    model.value = Some("transformer".to_owned());

    let mut hidden = entry("model.d_model", ConfigValue::Number(512.0));
    hidden.value = Some("default".to_owned());

    let mut lr = entry("learning_rate", ConfigValue::Number(0.001));
    lr.is_hyperparam = true;
    lr.is_custom = true;

    let mut epochs = entry("epochs", ConfigValue::Number(10.0));
    epochs.is_explicitly_specified = true;
    epochs.other_options = vec![
        ConfigValue::Text("short".to_owned()),
        ConfigValue::Number(3.0),
        ConfigValue::Text("long".to_owned()),
    ];

    let mut seed = entry("seed", ConfigValue::Number(7.0));
    seed.order = -1;
    seed.is_hyperparam = true;

    let mut meta = entry("device_info", ConfigValue::Null);
    meta.is_meta = true;

    ConfigSet::new(vec![model, hidden, lr, epochs, seed, meta])
}

#[test]
fn selection_cycles_through_favourite() {
    let state = SelectionState::Unselected;
    assert_eq!(state.toggle(), SelectionState::Selected);
    assert_eq!(state.toggle().toggle(), SelectionState::Favourite);
    assert_eq!(state.toggle().toggle().toggle(), SelectionState::Unselected);
}

#[test]
fn reduce_returns_new_state_for_tapped_key() {
    let set = sample_set();
    let next = set
        .clone()
        .reduce(SelectionEvent::Tap("epochs".to_owned()))
        .expect("known key");

    assert_eq!(
        set.get("epochs").map(|e| e.selection),
        Some(SelectionState::Unselected)
    );
    assert_eq!(
        next.get("epochs").map(|e| e.selection),
        Some(SelectionState::Selected)
    );
    assert_eq!(next.selected_keys(), vec!["epochs"]);

    let cleared = next.reduce(SelectionEvent::ClearAll).expect("clear");
    assert!(cleared.selected_keys().is_empty());
}

#[test]
fn reduce_rejects_unknown_key() {
    let err = sample_set()
        .reduce(SelectionEvent::Tap("missing".to_owned()))
        .expect_err("unknown key must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn entries_are_ordered_by_key() {
    let set = sample_set();
    let keys: Vec<&str> = set.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "device_info",
            "epochs",
            "learning_rate",
            "model",
            "model.d_model",
            "seed"
        ]
    );
}

#[test]
fn summary_defaults_to_hyperparams_and_specified_entries() {
    let set = sample_set();
    let keys: Vec<&str> = set.visible(true).iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["epochs", "learning_rate"]);
}

#[test]
fn summary_lists_only_selected_entries_once_any_is_selected() {
    let set = sample_set()
        .reduce(SelectionEvent::Tap("model".to_owned()))
        .expect("tap");
    let keys: Vec<&str> = set.visible(true).iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["model"]);
    assert_eq!(set.visible(false).len(), 6);
}

#[test]
fn item_views_skip_meta_entries() {
    let views = sample_set().item_views(false);
    assert_eq!(views.len(), 5);
    assert!(views.iter().all(|v| v.key != "device_info"));
}

#[test]
fn nested_entry_is_indented_and_inherits_default_parent() {
    let set = sample_set();
    let hidden = set.get("model.d_model").expect("entry");
    let view = set.item_view(hidden, false).expect("visible");

    assert_eq!(view.display_key, "--- d_model");
    assert_eq!(view.option.as_deref(), Some("default"));
    assert!(view.classes.contains(&ConfigClass::OnlyOption));
    assert!(view.classes.contains(&ConfigClass::NotHyperparam));

    let summary = set.item_view(hidden, true).expect("visible");
    assert_eq!(summary.display_key, "model.d_model");
}

#[test]
fn classes_reflect_origin_and_selection() {
    let set = sample_set()
        .reduce(SelectionEvent::Tap("learning_rate".to_owned()))
        .and_then(|s| s.reduce(SelectionEvent::Tap("learning_rate".to_owned())))
        .expect("taps");

    let lr = set.get("learning_rate").expect("entry");
    let view = set.item_view(lr, false).expect("visible");
    assert_eq!(
        view.classes.as_slice(),
        &[
            ConfigClass::Custom,
            ConfigClass::Hyperparam,
            ConfigClass::Favourite
        ]
    );
    assert_eq!(view.option, None);

    // Selection is not styled in the summary view.
    let summary = set.item_view(lr, true).expect("visible");
    assert!(!summary.classes.contains(&ConfigClass::Favourite));

    let seed = set.get("seed").expect("entry");
    let seed_view = set.item_view(seed, false).expect("visible");
    assert_eq!(
        seed_view.classes.as_slice(),
        &[
            ConfigClass::Ignored,
            ConfigClass::Picked,
            ConfigClass::Hyperparam
        ]
    );
}

#[test]
fn other_options_list_only_text_and_hide_in_summary() {
    let set = sample_set();
    let epochs = set.get("epochs").expect("entry");

    let view = set.item_view(epochs, false).expect("visible");
    assert_eq!(
        view.other_options,
        Some(RenderedValue::OptionList(vec![
            "short".to_owned(),
            "long".to_owned()
        ]))
    );
    assert!(view.classes.contains(&ConfigClass::Specified));

    let summary = set.item_view(epochs, true).expect("visible");
    assert_eq!(summary.other_options, None);
}

#[test]
fn computed_values_render_by_variant() {
    assert_eq!(
        render_config_value(&ConfigValue::Number(0.001)),
        RenderedValue::Scalar("0.001".to_owned())
    );
    assert_eq!(
        render_config_value(&ConfigValue::Bool(true)),
        RenderedValue::Scalar("true".to_owned())
    );
    assert_eq!(
        render_config_value(&ConfigValue::Text("adam\nw".to_owned())),
        RenderedValue::Scalar("adamw".to_owned())
    );
    assert_eq!(
        render_config_value(&ConfigValue::List(vec![
            ConfigValue::Number(1.0),
            ConfigValue::Text("x".to_owned()),
        ])),
        RenderedValue::Scalar("[1, x]".to_owned())
    );
}

#[test]
fn long_text_is_truncated_with_full_hover_text() {
    let text = "labml.nn.transformers.configs.TransformerConfigs";
    let rendered = render_config_value(&ConfigValue::Text(text.to_owned()));

    match rendered {
        RenderedValue::Truncated { shown, full } => {
            assert_eq!(full, text);
            assert_eq!(shown, "labml.nn.transformer…");
        }
        other => panic!("expected truncated value, got {other:?}"),
    }
}

#[test]
fn config_entries_deserialize_with_defaults() {
    let json = r#"[
        {"key": "optimizer", "name": "optimizer", "computed": "Adam", "is_hyperparam": true},
        {"key": "optimizer.lr", "name": "lr", "computed": 0.0003, "selection": "favourite"},
        {"key": "device", "name": "device", "computed": null}
    ]"#;

    let entries: Vec<ConfigEntry> = serde_json::from_str(json).expect("parse entries");
    let set = ConfigSet::new(entries);

    assert_eq!(set.len(), 3);
    let lr = set.get("optimizer.lr").expect("lr");
    assert_eq!(lr.computed, ConfigValue::Number(0.0003));
    assert_eq!(lr.selection, SelectionState::Favourite);
    assert_eq!(set.get("device").map(|e| &e.computed), Some(&ConfigValue::Null));
}
