use list_numbering::{
    CustomStyle, ListMirror, ListScope, ListUpdate, NodeKey, NodeKind, NumberingConfig,
    NumberingEngine, NumberingStyle, SymbolSystem,
};
use tokio::sync::broadcast;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn insert_list(list: NodeKey, scope: ListScope, count: u64) -> Vec<ListUpdate> {
    let mut batch = vec![ListUpdate::InsertNode {
        parent: NodeKey::ROOT,
        node: list,
        kind: NodeKind::Scope(scope),
        pos: 0,
    }];
    batch.extend((0..count).map(|index| ListUpdate::InsertNode {
        parent: list,
        node: NodeKey(list.0 + index + 1),
        kind: NodeKind::Item,
        pos: usize::try_from(index).unwrap(),
    }));
    batch
}

fn engine_with(list: NodeKey, scope: ListScope, count: u64) -> NumberingEngine {
    let mut engine = NumberingEngine::new();
    for update in insert_list(list, scope, count) {
        list_numbering::ListSubscriber::apply_update(&mut engine, update).unwrap();
    }
    engine
}

#[test]
fn ordered_lists_default_to_decimal_with_period() {
    init_logging();
    let engine = engine_with(NodeKey(1), ListScope::ordered(), 3);
    assert_eq!(engine.marker_text(NodeKey(3)).as_deref(), Some("2"));
    assert_eq!(engine.marker_text_with_suffix(NodeKey(4)).as_deref(), Some("3."));
}

#[test]
fn unordered_lists_render_bullets_without_suffix() {
    init_logging();
    let engine = engine_with(NodeKey(1), ListScope::unordered(), 2);
    assert_eq!(engine.marker_text(NodeKey(2)).as_deref(), Some("•"));
    assert_eq!(engine.marker_text_with_suffix(NodeKey(3)).as_deref(), Some("•"));
    // Ordinals are still tracked for bullet lists.
    assert_eq!(engine.value(NodeKey(3)), Some(2));
}

#[test]
fn item_style_overrides_list_style() {
    init_logging();
    let mut engine = engine_with(NodeKey(1), ListScope::ordered(), 4);
    engine.set_marker_style(NodeKey(1), Some(NumberingStyle::UpperRoman)).unwrap();
    engine.set_marker_style(NodeKey(3), Some(NumberingStyle::LowerAlpha)).unwrap();
    engine.set_marker_style(NodeKey(5), Some(NumberingStyle::Square)).unwrap();
    assert_eq!(engine.marker_text(NodeKey(2)).as_deref(), Some("I"));
    assert_eq!(engine.marker_text(NodeKey(3)).as_deref(), Some("b"));
    assert_eq!(engine.marker_text_with_suffix(NodeKey(4)).as_deref(), Some("III."));
    assert_eq!(engine.marker_text(NodeKey(5)).as_deref(), Some("▪"));

    engine.set_marker_style(NodeKey(3), None).unwrap();
    assert_eq!(engine.marker_text(NodeKey(3)).as_deref(), Some("II"));
}

#[test]
fn roman_markers_fall_back_to_decimal_outside_their_range() {
    init_logging();
    // <ol start="0" style="list-style-type: lower-roman">
    let scope = ListScope::ordered().with_start(0).with_style(NumberingStyle::LowerRoman);
    let engine = engine_with(NodeKey(1), scope, 3);
    assert_eq!(engine.marker_text(NodeKey(2)).as_deref(), Some("0"));
    assert_eq!(engine.marker_text(NodeKey(3)).as_deref(), Some("i"));
    assert_eq!(engine.marker_text_with_suffix(NodeKey(4)).as_deref(), Some("ii."));
}

#[test]
fn markers_follow_renumbering() {
    init_logging();
    let mut engine = engine_with(
        NodeKey(1),
        ListScope::ordered().with_style(NumberingStyle::UpperAlpha),
        3,
    );
    assert_eq!(engine.marker_text(NodeKey(4)).as_deref(), Some("C"));
    engine.set_explicit_value(NodeKey(3), 26).unwrap();
    assert_eq!(engine.marker_text(NodeKey(3)).as_deref(), Some("Z"));
    assert_eq!(engine.marker_text(NodeKey(4)).as_deref(), Some("AA"));
}

#[test]
fn custom_styles_carry_their_own_suffix() {
    init_logging();
    let binary = CustomStyle::new(SymbolSystem::Numeric, ["0", "1"], ") ");
    let engine = engine_with(
        NodeKey(1),
        ListScope::ordered().with_style(NumberingStyle::Custom(binary)),
        5,
    );
    assert_eq!(engine.marker_text_with_suffix(NodeKey(6)).as_deref(), Some("101) "));
}

#[test]
fn configured_default_style_applies_to_unstyled_items() {
    init_logging();
    let mut engine = NumberingEngine::with_config(NumberingConfig {
        default_style: NumberingStyle::LowerGreek,
        ..NumberingConfig::default()
    });
    engine.insert_node(NodeKey::ROOT, NodeKey(1), NodeKind::Container, 0).unwrap();
    engine.insert_node(NodeKey(1), NodeKey(2), NodeKind::Item, 0).unwrap();
    engine.insert_node(NodeKey(1), NodeKey(3), NodeKind::Item, 1).unwrap();
    assert_eq!(engine.marker_text(NodeKey(3)).as_deref(), Some("β"));
    assert_eq!(engine.config().default_style, NumberingStyle::LowerGreek);
}

#[test]
fn none_style_renders_nothing() {
    init_logging();
    let engine = engine_with(NodeKey(1), ListScope::ordered().with_style(NumberingStyle::None), 1);
    assert_eq!(engine.marker_text(NodeKey(2)).as_deref(), Some(""));
    assert_eq!(engine.marker_text_with_suffix(NodeKey(2)).as_deref(), Some(""));
}

#[test]
fn mirror_applies_queued_batches() {
    init_logging();
    let (sender, receiver) = broadcast::channel(16);
    let mut mirror = ListMirror::new(receiver, NumberingEngine::new());
    assert_eq!(mirror.try_update_sync().unwrap(), 0);

    sender.send(insert_list(NodeKey(10), ListScope::ordered(), 3)).unwrap();
    sender
        .send(vec![
            ListUpdate::SetExplicitValue {
                node: NodeKey(12),
                value: Some(7),
            },
            ListUpdate::SetScopeAttributes {
                node: NodeKey(10),
                start: Some(3),
                reversed: false,
            },
        ])
        .unwrap();
    assert_eq!(mirror.try_update_sync().unwrap(), 2);
    assert_eq!(mirror.mirror().value(NodeKey(11)), Some(3));
    assert_eq!(mirror.mirror().value(NodeKey(13)), Some(8));

    sender
        .send(vec![
            ListUpdate::SetExplicitValue {
                node: NodeKey(12),
                value: None,
            },
            ListUpdate::SetExcluded {
                node: NodeKey(11),
                excluded: true,
            },
            ListUpdate::SetMarkerStyle {
                node: NodeKey(10),
                style: Some(NumberingStyle::LowerRoman),
            },
        ])
        .unwrap();
    assert_eq!(mirror.try_update_sync().unwrap(), 1);
    assert_eq!(mirror.mirror().marker_text(NodeKey(13)).as_deref(), Some("iv"));

    sender.send(vec![ListUpdate::RemoveNode { node: NodeKey(12) }]).unwrap();
    mirror.try_update_sync().unwrap();
    assert_eq!(mirror.mirror().value(NodeKey(13)), Some(3));
    assert_eq!(mirror.mirror_mut().item_count(NodeKey(10)), 1);
}

#[test]
fn mirror_reports_bad_updates() {
    init_logging();
    let (sender, receiver) = broadcast::channel(4);
    let mut mirror = ListMirror::new(receiver, NumberingEngine::new());
    sender.send(vec![ListUpdate::RemoveNode { node: NodeKey(5) }]).unwrap();
    assert!(mirror.try_update_sync().is_err());
}

#[test]
fn mirror_fails_once_the_channel_closes() {
    init_logging();
    let (sender, receiver) = broadcast::channel(4);
    let mut mirror = ListMirror::new(receiver, NumberingEngine::new());
    sender.send(insert_list(NodeKey(1), ListScope::ordered(), 2)).unwrap();
    drop(sender);
    assert!(mirror.try_update_sync().is_err());
    // The batch queued before the close was still applied.
    assert_eq!(mirror.mirror().value(NodeKey(3)), Some(2));
}

#[test]
fn mirror_fails_when_it_falls_behind() {
    init_logging();
    let (sender, receiver) = broadcast::channel(1);
    let mut mirror = ListMirror::new(receiver, NumberingEngine::new());
    sender.send(insert_list(NodeKey(1), ListScope::ordered(), 1)).unwrap();
    sender
        .send(vec![ListUpdate::SetExplicitValue {
            node: NodeKey(2),
            value: Some(4),
        }])
        .unwrap();
    assert!(mirror.try_update_sync().is_err());
}
