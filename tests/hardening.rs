//! Property tests: random collections always end up unique, unscoped and
//! stable after one pass.

mod support;
use support::*;

use proptest::prelude::*;
use scopespread::core::domain::{Variable, VariableCollection};
use scopespread::{spread_space, InMemory, SpreadOptions};

const NAMES: &[&str] = &[
    "Db.Password",
    "Db.Password_Development",
    "Db.Password_Unscoped",
    "Api.Key",
    "Api.Key_Production",
];

const ENVIRONMENTS: &[&str] = &["Environments-1", "Environments-2", "Environments-3"];

fn variable_strategy() -> impl Strategy<Value = (usize, bool, Option<usize>)> {
    (
        0..NAMES.len(),
        any::<bool>(),
        prop::option::of(0..ENVIRONMENTS.len()),
    )
}

fn build(specs: &[(usize, bool, Option<usize>)]) -> VariableCollection {
    let mut set = VariableCollection::new("variableset-LibraryVariableSets-1", LIBRARY_SET_ID);
    for (i, (name, sensitive, env)) in specs.iter().enumerate() {
        let variable = if *sensitive {
            Variable::sensitive(NAMES[*name])
        } else {
            Variable::new(NAMES[*name], "plain")
        };
        let variable = match env {
            Some(env) => variable.with_scope(environments(&[ENVIRONMENTS[*env]])),
            None => variable,
        };
        set.variables.push(variable.with_id(format!("v-{}", i)));
    }
    set
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn spread_is_unique_unscoped_and_idempotent(
        specs in prop::collection::vec(variable_strategy(), 0..16)
    ) {
        let mut space = library_space();
        space.variable_sets = vec![build(&specs)];
        let before = space.variable_sets[0].clone();

        let mut platform = InMemory::new(space);
        let options = SpreadOptions::default();
        let report = spread_space(&mut platform, &options).unwrap();

        let after = platform.space().clone();
        let set = collection(&after, LIBRARY_SET_ID);
        assert_secret_names_unique(set);
        assert_secrets_unscoped(set);
        prop_assert_eq!(set.variables.len(), before.variables.len() + report.references_created());

        for rename in report.collections.iter().flat_map(|c| c.renames.iter()) {
            prop_assert_eq!(rename.to.trim(), rename.to.as_str());
            prop_assert!(!rename.to.ends_with('_'));
        }

        for plain in before.variables.iter().filter(|v| !v.is_sensitive) {
            prop_assert!(set.variables.contains(plain));
        }

        let again = spread_space(&mut platform, &options).unwrap();
        prop_assert_eq!(again.renamed(), 0);
        prop_assert_eq!(platform.space(), &after);
    }
}
