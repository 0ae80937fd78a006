//! Todo domain - update, upsert and connectOrCreate grammar.

use tenantry_tests::prelude::*;

mod update {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("update")
            .schema("todo/schema.json")
            .config("todo/config.json")
            .cases("todo/mutations/update.json")
            .step("update_list_injects_inside_data", |a| {
                a.expected()
                    .bound("/tags/update/0/data", "company_relation")
                    .unbound("/tags/update/0", "company_relation")
                    .unchanged("/tags/update/0/where")
            })
            .step("update_single_wrapper", |a| {
                a.bound("/comments/update/data", "company")
                    .unbound("/comments/update", "company")
            })
            .step("upsert_both_branches", |a| {
                a.expected()
                    .bound("/assignee/upsert/create", "employer")
                    .bound("/assignee/upsert/update", "employer")
            })
            .step("connect_or_create_array_create", |a| {
                a.expected().unchanged("/tags/connectOrCreate/where")
            })
            .all_cases()
    }

    #[test]
    fn test() {
        scenario().run().unwrap();
    }
}
