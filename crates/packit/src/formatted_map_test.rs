// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, HashMap};

use rstest::rstest;

use super::*;
use crate::Environment;

fn string_map(pairs: &[(&str, &str)]) -> FormattedMap {
    pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
}

#[rstest]
fn test_render_sorts_and_aligns_keys() {
    let mut map = FormattedMap::new();
    map.insert("third", 3);
    map.insert("first", 1);
    map.insert("second", 2);

    assert_eq!(
        map.to_string(),
        "first  -> \"1\"\nsecond -> \"2\"\nthird  -> \"3\""
    );
}

#[rstest]
fn test_render_empty() {
    assert_eq!(FormattedMap::<String>::new().to_string(), "");
}

#[rstest]
fn test_render_single_entry_has_no_padding() {
    let map = string_map(&[("KEY", "value")]);
    assert_eq!(map.to_string(), "KEY -> \"value\"");
}

#[rstest]
fn test_from_environment_all_operations() {
    let env: Environment = [
        ("OVERRIDE.override", "some-value"),
        ("DEFAULT.default", "some-value"),
        ("PREPEND.prepend", "some-value"),
        ("PREPEND.delim", ":"),
        ("APPEND.append", "some-value"),
        ("APPEND.delim", ":"),
        ("BOTH.append", "appended-value"),
        ("BOTH.delim", ":"),
        ("BOTH.prepend", "prepended-value"),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        FormattedMap::from_environment(&env),
        string_map(&[
            ("OVERRIDE", "some-value"),
            ("DEFAULT", "some-value"),
            ("PREPEND", "some-value:$PREPEND"),
            ("APPEND", "$APPEND:some-value"),
            ("BOTH", "prepended-value:$BOTH:appended-value"),
        ])
    );
}

#[rstest]
#[case(&[("PREPEND.prepend", "v"), ("PREPEND.delim", ":")], "PREPEND", "v:$PREPEND")]
#[case(&[("APPEND.append", "v"), ("APPEND.delim", ":")], "APPEND", "$APPEND:v")]
#[case(
    &[("BOTH.prepend", "p"), ("BOTH.append", "a"), ("BOTH.delim", ":")],
    "BOTH",
    "p:$BOTH:a"
)]
fn test_from_environment_single_variable(
    #[case] ops: &[(&str, &str)],
    #[case] name: &str,
    #[case] expected: &str,
) {
    let env: Environment = ops.iter().copied().collect();
    assert_eq!(
        FormattedMap::from_environment(&env),
        string_map(&[(name, expected)])
    );
}

#[rstest]
fn test_from_environment_builder_output() {
    let mut env = Environment::new();
    env.prepend("PATH", "/layers/node/bin", ":");
    env.set_default("NODE_ENV", "production");

    let map = FormattedMap::from_environment(&env);
    assert_eq!(
        map.to_string(),
        "NODE_ENV -> \"production\"\nPATH     -> \"/layers/node/bin:$PATH\""
    );
}

#[rstest]
fn test_from_plain_hash_map() {
    let plain: HashMap<String, String> = [
        ("SOME_ENV_VAR".to_string(), "some-value".to_string()),
        ("SOME_OTHER_ENV_VAR".to_string(), "some-other-value".to_string()),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        FormattedMap::from_environment(&plain),
        string_map(&[
            ("SOME_ENV_VAR", "some-value"),
            ("SOME_OTHER_ENV_VAR", "some-other-value"),
        ])
    );
}

#[rstest]
fn test_from_plain_map_keeps_dotted_keys() {
    let plain: BTreeMap<String, String> =
        [("K.prepend".to_string(), "V".to_string())].into_iter().collect();

    assert_eq!(
        FormattedMap::from_environment(&plain),
        string_map(&[("K.prepend", "V")])
    );
}
