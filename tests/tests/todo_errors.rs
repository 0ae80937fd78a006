//! Todo domain - configuration defects surface, overrides fix them.

use tenantry_tests::prelude::*;

mod errors {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("errors")
            .schema("todo/schema.json")
            .config("todo/config.json")
            .cases("todo/mutations/errors.json")
            .config_errors(["Invoice"])
            .step("ambiguous_nested_create", |a| {
                a.fails().fails_with("$.issued.create[0]")
            })
            .all_cases()
    }

    #[test]
    fn test() {
        scenario().run().unwrap();
    }
}

mod overrides {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("overrides")
            .schema("todo/schema.json")
            .config("todo/config-overrides.json")
            .cases("todo/mutations/errors.json")
            .config_errors(Vec::<String>::new())
            .step("ambiguous_nested_create", |a| {
                a.bound("/issued/create/0", "issuer")
                    .unbound("/issued/create/0", "recipient")
            })
            .step("ambiguous_root", |a| a.bound("", "issuer"))
            .step("unknown_root", |a| a.fails())
    }

    #[test]
    fn test() {
        scenario().run().unwrap();
    }
}

mod broken_config {
    use super::*;

    #[test]
    fn test_unknown_tenant_entity_fails_session_build() {
        let err = Scenario::new("broken")
            .schema("todo/schema.json")
            .config("todo/config-unknown-tenant.json")
            .cases("todo/mutations/errors.json")
            .all_cases()
            .run()
            .unwrap_err();

        assert!(matches!(err, ScenarioError::SessionBuild { .. }));
        assert!(err.to_string().contains("Organisation"));
    }
}
