// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use tempfile::TempDir;

use super::*;

fn create_binding(root: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).expect("Failed to create binding dir");
    for (file, content) in files {
        std::fs::write(dir.join(file), content).expect("Failed to write entry");
    }
    dir
}

#[rstest]
fn test_load_binding() {
    let tmp = TempDir::new().unwrap();
    let dir = create_binding(
        tmp.path(),
        "my-db",
        &[
            ("type", "postgres\n"),
            ("provider", "bitnami"),
            ("username", "admin"),
            (".hidden", "ignored"),
        ],
    );

    let mut binding = Binding::load(&dir).expect("Should load binding");
    assert_eq!(binding.name, "my-db");
    assert_eq!(binding.binding_type, "postgres");
    assert_eq!(binding.provider.as_deref(), Some("bitnami"));
    assert_eq!(
        binding.entries.keys().collect::<Vec<_>>(),
        vec!["provider", "type", "username"]
    );

    let username = binding.entry("username").expect("username entry");
    assert_eq!(username.read_string().unwrap(), "admin");
}

#[rstest]
fn test_load_binding_without_type() {
    let tmp = TempDir::new().unwrap();
    let dir = create_binding(tmp.path(), "untyped", &[("username", "admin")]);

    let result = Binding::load(&dir);
    assert!(matches!(result, Err(Error::MissingBindingType(_))));
}

#[rstest]
fn test_load_binding_not_a_directory() {
    let tmp = TempDir::new().unwrap();
    let result = Binding::load(tmp.path().join("nope"));
    assert!(matches!(result, Err(Error::BindingNotFound(_))));
}

#[rstest]
fn test_load_all_sorted() {
    let tmp = TempDir::new().unwrap();
    create_binding(tmp.path(), "zeta", &[("type", "redis")]);
    create_binding(tmp.path(), "alpha", &[("type", "mysql")]);
    std::fs::write(tmp.path().join("stray-file"), "x").unwrap();

    let resolver = BindingResolver::new(tmp.path());
    let names: Vec<String> = resolver
        .load_all()
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}

#[rstest]
fn test_load_all_missing_root() {
    let tmp = TempDir::new().unwrap();
    let resolver = BindingResolver::new(tmp.path().join("bindings"));
    assert!(resolver.load_all().unwrap().is_empty());
}

#[rstest]
#[case("postgres", None, 2)]
#[case("POSTGRES", None, 2)]
#[case("postgres", Some("bitnami"), 1)]
#[case("postgres", Some("Crunchy"), 1)]
#[case("postgres", Some("other"), 0)]
#[case("redis", None, 0)]
fn test_resolve(#[case] binding_type: &str, #[case] provider: Option<&str>, #[case] count: usize) {
    let tmp = TempDir::new().unwrap();
    create_binding(tmp.path(), "db-1", &[("type", "postgres"), ("provider", "bitnami")]);
    create_binding(tmp.path(), "db-2", &[("type", "Postgres"), ("provider", "crunchy")]);
    create_binding(tmp.path(), "cache", &[("type", "memcached")]);

    let resolver = BindingResolver::new(tmp.path());
    let bindings = resolver.resolve(binding_type, provider).unwrap();
    assert_eq!(bindings.len(), count);
}

#[rstest]
fn test_resolve_one() {
    let tmp = TempDir::new().unwrap();
    create_binding(tmp.path(), "db-1", &[("type", "postgres")]);
    create_binding(tmp.path(), "db-2", &[("type", "postgres")]);
    create_binding(tmp.path(), "cache", &[("type", "redis")]);

    let resolver = BindingResolver::new(tmp.path());
    let binding = resolver.resolve_one("redis", None).unwrap();
    assert_eq!(binding.name, "cache");

    let err = resolver.resolve_one("postgres", None).unwrap_err();
    assert!(matches!(err, Error::BindingCount { count: 2, .. }));

    let err = resolver.resolve_one("mysql", None).unwrap_err();
    assert!(matches!(err, Error::BindingCount { count: 0, .. }));
}
