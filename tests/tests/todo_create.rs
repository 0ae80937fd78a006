//! Todo domain - create sites at every depth and in every shape.

use tenantry_tests::prelude::*;

mod create {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("create")
            .schema("todo/schema.json")
            .config("todo/config.json")
            .cases("todo/mutations/create.json")
            .config_errors(["Invoice"])
            .step("per_entity_relation_names", |a| {
                a.expected()
                    .bound("", "company")
                    .bound("/tags/create", "company_relation")
                    .unbound("/tags/create", "company")
            })
            .step("array_create", |a| {
                a.bound("/tags/create/0", "company_relation")
                    .bound("/tags/create/1", "company_relation")
            })
            .step("deep_nesting", |a| {
                a.expected()
                    .bound("/children/create/comments/create", "company")
                    .bound("/children/create/comments/create/author/create", "employer")
            })
            .step("exempt_entity", |a| {
                a.expected()
                    .unbound("/country/connectOrCreate/create", "company")
                    .unchanged("/country")
            })
            .step("tenant_root", |a| a.expected().unbound("", "company"))
            .all_cases()
    }

    #[test]
    fn test() {
        scenario().run().unwrap();
    }
}
