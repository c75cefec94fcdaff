//! Integration tests for dependency edges.
//!
//! Descriptors are parsed from TOML, resolved into edges, and the derived
//! filters are checked against the visibility rules for each kind of path.

use modpath::core::dependency::{
    DependencyDeclaration, DependencyFilterResolver, PathRule, SystemDependencyDeclaration,
};
use modpath::core::descriptor::{DescriptorError, ModuleDescriptor};
use modpath::core::types::{ModuleRef, ServicesMode};
use modpath::filters;

fn declaration(name: &str) -> DependencyDeclaration {
    DependencyDeclaration::new(ModuleRef::new(name).unwrap())
}

// =============================================================================
// Programmatic declarations
// =============================================================================

#[test]
fn exported_dependency_hides_meta_inf() {
    let edge = DependencyFilterResolver::resolve(&declaration("org.acme").with_export(true));

    assert!(edge.export_filter.accept("com/acme/Foo.class"));
    assert!(!edge.export_filter.accept("META-INF"));
    assert!(!edge.export_filter.accept("META-INF/MANIFEST.MF"));
}

#[test]
fn exported_services_win_over_meta_inf_exclusion() {
    let edge = DependencyFilterResolver::resolve(
        &declaration("org.acme")
            .with_export(true)
            .with_services(ServicesMode::Export),
    );

    assert!(edge.export_filter.accept("META-INF/services/com.foo.Bar"));
    assert!(!edge.export_filter.accept("META-INF/MANIFEST.MF"));
    assert!(edge.import_filter.accept("META-INF/services/com.foo.Bar"));
}

#[test]
fn unexported_dependency_exports_nothing_by_default() {
    let edge = DependencyFilterResolver::resolve(&declaration("org.acme"));

    assert_eq!(edge.export_filter, filters::reject_all());
    assert_eq!(edge.import_filter, filters::default_import_filter());
    assert!(edge.import_filter.accept("com/acme"));
    assert!(!edge.import_filter.accept("META-INF/services/x"));
}

#[test]
fn imported_services_are_visible_but_not_reexported() {
    let edge = DependencyFilterResolver::resolve(
        &declaration("org.acme")
            .with_export(true)
            .with_services(ServicesMode::Import),
    );

    assert_eq!(
        edge.import_filter,
        filters::default_import_filter_with_services()
    );
    assert!(edge.import_filter.accept("META-INF/services/x.Y"));
    assert!(!edge.export_filter.accept("META-INF/services/x.Y"));
}

#[test]
fn explicit_import_rules_keep_order() {
    let edge = DependencyFilterResolver::resolve(
        &declaration("org.acme")
            .with_import_rule(PathRule::parse("com/acme/impl/keep"), true)
            .with_import_rule(PathRule::parse("com/acme/impl/"), false),
    );

    assert!(edge.import_filter.accept("com/acme/impl/keep"));
    assert!(!edge.import_filter.accept("com/acme/impl/other"));
    assert!(edge.import_filter.accept("com/acme/impl"));
    assert!(edge.import_filter.accept("com/acme/api"));
    assert!(!edge.import_filter.accept("META-INF/MANIFEST.MF"));
}

#[test]
fn explicit_rules_cannot_reveal_meta_inf_without_services() {
    let edge = DependencyFilterResolver::resolve(
        &declaration("org.acme").with_import_rule(PathRule::parse("com/**"), false),
    );

    assert!(!edge.import_filter.accept("com/acme"));
    assert!(!edge.import_filter.accept("META-INF/services/x"));
    assert!(edge.import_filter.accept("org/acme"));
}

#[test]
fn identical_declarations_give_equal_edges() {
    let build = || {
        declaration("org.acme")
            .with_export(true)
            .with_import_rule(PathRule::parse("a/*"), false)
            .with_export_rule(PathRule::set(["x", "y"]), false)
    };

    let a = DependencyFilterResolver::resolve(&build());
    let b = DependencyFilterResolver::resolve(&build());

    assert_eq!(a, b);
}

#[test]
fn system_edge_uses_fixed_paths() {
    let decl = SystemDependencyDeclaration {
        paths: ["java/lang", "java/util"].into_iter().map(String::from).collect(),
        export: true,
        ..Default::default()
    };

    let edge = DependencyFilterResolver::resolve_system(&decl);

    assert!(edge.can_import("java/lang"));
    assert!(!edge.can_import("java/lang/reflect"));
    assert!(edge.export_filter.accept("java/lang"));
    assert!(!edge.export_filter.accept("META-INF"));
}

// =============================================================================
// Descriptor round trip
// =============================================================================

const DESCRIPTOR: &str = r#"
[[dependency]]
name = "org.acme.api"
export = true
services = "export"

[[dependency.exports]]
exclude = "com/acme/internal/**"

[[dependency]]
name = "org.acme.impl"
optional = true

[[dependency.imports]]
include-set = ["com/acme/impl/spi"]
[[dependency.imports]]
exclude = "com/acme/impl/"

[system]
paths = ["java/lang"]
"#;

#[test]
fn descriptor_resolves_every_edge() {
    let resolved = ModuleDescriptor::parse(DESCRIPTOR).unwrap().resolve_all();

    assert_eq!(resolved.edges.len(), 2);

    let api = &resolved.edges[0];
    assert_eq!(api.target.as_str(), "org.acme.api");
    assert!(api.export_filter.accept("com/acme/api"));
    assert!(!api.export_filter.accept("com/acme/internal/x"));
    assert!(api.export_filter.accept("META-INF/services/com.acme.Spi"));
    assert!(!api.export_filter.accept("META-INF/MANIFEST.MF"));

    let implementation = &resolved.edges[1];
    assert!(implementation.optional);
    assert!(implementation.import_filter.accept("com/acme/impl/spi"));
    assert!(!implementation.import_filter.accept("com/acme/impl/core"));
    assert_eq!(implementation.export_filter, filters::reject_all());

    let system = resolved.system.unwrap();
    assert!(system.can_import("java/lang"));
    assert_eq!(system.export_filter, filters::reject_all());
}

#[test]
fn descriptor_errors_surface_before_resolution() {
    let err = ModuleDescriptor::parse(
        r#"
        [[dependency]]
        name = "org.acme"
        services = "sometimes"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, DescriptorError::InvalidServices { .. }));

    let err = ModuleDescriptor::parse(
        r#"
        [[dependency]]
        name = "org.acme"

        [[dependency.imports]]
        include = "a"
        exclude = "b"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, DescriptorError::InvalidRule { index: 0, .. }));

    let err = ModuleDescriptor::parse("[[dependency]]\nname = \"\"\n").unwrap_err();
    assert!(matches!(err, DescriptorError::InvalidTarget { index: 0, .. }));
}

#[test]
fn rendered_default_filters() {
    insta::assert_snapshot!(
        filters::default_import_filter().to_string(),
        @r#"multi(default=true, [child-of("META-INF/") => exclude, is("META-INF") => exclude])"#
    );
    insta::assert_snapshot!(
        filters::default_import_filter_with_services().to_string(),
        @r#"multi(default=true, [is("META-INF/services") => include, child-of("META-INF/services/") => include, child-of("META-INF/") => exclude, is("META-INF") => exclude])"#
    );
    insta::assert_snapshot!(
        filters::meta_inf_services().to_string(),
        @r#"any(is("META-INF/services"), child-of("META-INF/services/"))"#
    );
}
