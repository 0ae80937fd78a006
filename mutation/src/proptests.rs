use crate::MutationMerger;
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use tenantry_core::{EntityDef, FieldDescriptor as F};
use tenantry_graph::SchemaGraph;
use tenantry_resolver::{ResolvedRelations, TenantConfig};

fn graph() -> SchemaGraph {
    SchemaGraph::build(vec![
        EntityDef::new("Company")
            .field(F::relation("todos", "Todo").list())
            .field(F::relation("tags", "Tag").list()),
        EntityDef::new("Todo")
            .field(F::scalar("title"))
            .field(F::relation("company", "Company").owns(["companyId"]))
            .field(F::relation("tags", "Tag").list())
            .field(F::relation("parent", "Todo").named("Subtasks").owns(["parentId"]))
            .field(F::relation("children", "Todo").named("Subtasks").list()),
        EntityDef::new("Tag")
            .field(F::scalar("name"))
            .field(F::relation("company_relation", "Company").owns(["companyId"]))
            .field(F::relation("todos", "Todo").list()),
    ])
    .unwrap()
}

fn bound() -> Value {
    json!({ "connect": { "id": "c1" } })
}

#[derive(Debug, Clone, Copy)]
enum Nest {
    Create,
    CreateList,
    CreateMany,
    ConnectOrCreate,
    Upsert,
}

impl Nest {
    /// Wrap `child` in an operation; returns the operations object and the
    /// JSON pointer from it to `child`.
    fn wrap(self, child: Value) -> (Value, &'static str) {
        match self {
            Nest::Create => (json!({ "create": child }), "/create"),
            Nest::CreateList => (json!({ "create": [child] }), "/create/0"),
            Nest::CreateMany => (json!({ "createMany": { "data": [child] } }), "/createMany/data/0"),
            Nest::ConnectOrCreate => (
                json!({ "connectOrCreate": { "where": { "id": "x" }, "create": child } }),
                "/connectOrCreate/create",
            ),
            Nest::Upsert => (
                json!({ "upsert": { "where": { "id": "x" }, "create": child, "update": {} } }),
                "/upsert/create",
            ),
        }
    }
}

fn arb_nest() -> impl Strategy<Value = Nest> {
    prop_oneof![
        Just(Nest::Create),
        Just(Nest::CreateList),
        Just(Nest::CreateMany),
        Just(Nest::ConnectOrCreate),
        Just(Nest::Upsert),
    ]
}

const KEYS: [&str; 14] = [
    "title", "name", "tags", "children", "parent", "company", "create", "createMany", "data",
    "where", "update", "upsert", "connectOrCreate", "connect",
];

fn arb_tree() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,4}".prop_map(Value::from),
    ];
    leaf.prop_recursive(5, 64, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Array),
            prop::collection::btree_map(prop::sample::select(KEYS.to_vec()), inner, 0..4)
                .prop_map(|fields| {
                    Value::Object(
                        fields
                            .into_iter()
                            .map(|(k, v)| (k.to_string(), v))
                            .collect::<Map<String, Value>>(),
                    )
                }),
        ]
    })
}

proptest! {
    #[test]
    fn merge_is_idempotent(tree in arb_tree()) {
        let graph = graph();
        let relations = ResolvedRelations::build(&graph, &TenantConfig::new("Company"));
        let merger = MutationMerger::new(&graph, &relations);

        let once = merger.merge(&tree, &bound(), "Todo").unwrap();
        let twice = merger.merge(&once, &bound(), "Todo").unwrap();

        prop_assert_eq!(twice, once);
    }

    #[test]
    fn create_sites_are_bound_at_any_depth(
        chain in prop::collection::vec(arb_nest(), 0..8),
        tag_nest in arb_nest(),
    ) {
        // GIVEN a chain of Todo creates ending in a Tag create
        let (tags, tag_suffix) = tag_nest.wrap(json!({ "name": "leaf" }));
        let mut node = json!({ "title": "bottom", "tags": tags });
        let mut suffixes = Vec::with_capacity(chain.len());
        for nest in chain.iter().rev() {
            let (children, suffix) = nest.wrap(node);
            node = json!({ "title": "level", "children": children });
            suffixes.push(suffix);
        }
        suffixes.reverse();

        let graph = graph();
        let relations = ResolvedRelations::build(&graph, &TenantConfig::new("Company"));

        // WHEN
        let merged = MutationMerger::new(&graph, &relations)
            .merge(&node, &bound(), "Todo")
            .unwrap();

        // THEN every Todo carries `company`, the Tag carries `company_relation`
        let mut pointer = String::new();
        for depth in 0..=suffixes.len() {
            let todo = merged.pointer(&pointer).unwrap();
            prop_assert_eq!(&todo["company"], &bound());
            prop_assert!(todo.get("company_relation").is_none());
            if let Some(suffix) = suffixes.get(depth) {
                pointer.push_str("/children");
                pointer.push_str(suffix);
            }
        }
        pointer.push_str("/tags");
        pointer.push_str(tag_suffix);
        let tag = merged.pointer(&pointer).unwrap();
        prop_assert_eq!(&tag["company_relation"], &bound());
        prop_assert!(tag.get("company").is_none());
    }
}
