//! End-to-end resolution through an installed resolver.

use futures::executor::block_on;
use unimod_core::bootstrap::install;
use unimod_core::namespace::EMPTY_MODULE;
use unimod_core::{
    normalize, Environment, Error, ImplicitRelative, Module, ModuleRegistry, ModuleResolver,
    ResolverConfig,
};

fn resolve(config: ResolverConfig, reference: &str, parent: Option<&str>) -> Result<String, Error> {
    let registry = ModuleRegistry::new();
    let resolver = install(&registry, config)?;
    block_on(resolver.resolve_id(reference, parent, None))
}

#[test]
fn test_absolute_without_parent() {
    assert_eq!(
        resolve(ResolverConfig::default(), "/foo", None).unwrap(),
        "/_modules_/app/foo"
    );
}

#[test]
fn test_directory_in_package_parent() {
    assert_eq!(
        resolve(
            ResolverConfig::default(),
            "/bar/",
            Some("/_modules_/packages/alice/mypkg/index")
        )
        .unwrap(),
        "/_modules_/packages/alice/mypkg/bar/index"
    );
}

#[test]
fn test_package_braces() {
    assert_eq!(
        resolve(ResolverConfig::default(), "{alice:mypkg}", None).unwrap(),
        "/_modules_/packages/alice/mypkg/index"
    );
}

#[test]
fn test_client_reference_on_server() {
    let config = ResolverConfig::default().with_environment(Environment::new(true, false));
    assert_eq!(resolve(config, "thing@client", None).unwrap(), EMPTY_MODULE);
}

#[test]
fn test_platform_selector_matches_plain_normalize() {
    let parent = Some("/_modules_/app/client/main");
    for (env, tag) in [
        (Environment::server(), "@server"),
        (Environment::client(), "@client"),
    ] {
        let config = ResolverConfig::default().with_environment(env);
        let reference = format!("/lib/thing{tag}");
        assert_eq!(
            resolve(config, &reference, parent).unwrap(),
            normalize("/lib/thing", parent).unwrap()
        );
    }
}

#[test]
fn test_elided_module_imports_as_empty() {
    let registry = ModuleRegistry::new();
    let resolver = install(
        &registry,
        ResolverConfig::default().with_environment(Environment::client()),
    )
    .unwrap();

    let id = block_on(resolver.resolve_id("{alice:db}@server", None, None)).unwrap();
    assert_eq!(registry.import(&id).unwrap(), Module::Empty);
}

#[test]
fn test_relative_reference_through_host() {
    assert_eq!(
        resolve(
            ResolverConfig::default(),
            "../util/",
            Some("/_modules_/packages/alice/mypkg/lib/index")
        )
        .unwrap(),
        "/_modules_/packages/alice/mypkg/util/index"
    );
}

#[test]
fn test_bare_reference_in_package() {
    let parent = Some("/_modules_/packages/alice/mypkg/lib/index");
    assert_eq!(
        resolve(ResolverConfig::default(), "helpers.import", parent).unwrap(),
        "/_modules_/packages/alice/mypkg/lib/helpers"
    );

    let legacy = ResolverConfig::default().with_implicit_relative(ImplicitRelative::Legacy);
    assert_eq!(
        resolve(legacy, "helpers", parent).unwrap(),
        "/_modules_/packages/alice/mypkg/lib/_modules_/packages/alice/mypkg/lib/index"
    );
}

#[test]
fn test_malformed_parent_is_error() {
    let err = resolve(ResolverConfig::default(), "/x", Some("/app/x")).unwrap_err();
    assert!(matches!(err, Error::InvalidParent { .. }));

    let err = resolve(ResolverConfig::default(), "/x", Some("/_modules_/lib/x")).unwrap_err();
    assert!(matches!(err, Error::UnresolvableParent { .. }));
}

#[test]
fn test_registered_loader_hooks() {
    let registry = ModuleRegistry::new();
    install(&registry, ResolverConfig::default()).unwrap();

    let loader = registry.loader("UniverseModulesLoader").unwrap();
    let res = loader.normalize_sync("{}/main", None).unwrap();
    assert_eq!(res.as_resolved(), Some("/_modules_/app/main"));

    let err = registry.import("/_modules_/app/main").unwrap_err();
    assert!(matches!(err, Error::ModuleNotFound { ref name } if name == "app/main"));
}

#[test]
fn test_registered_module_short_circuits_loader() {
    let registry = ModuleRegistry::new();
    install(&registry, ResolverConfig::default()).unwrap();
    registry.register_module(
        "/_modules_/app/main",
        Module::Namespace(vec!["default".to_string()]),
    );

    assert_eq!(
        registry.import("/_modules_/app/main").unwrap(),
        Module::Namespace(vec!["default".to_string()])
    );
}
