//! Checks on the release build configuration.

#[test]
fn cargo_toml_has_release_profile() {
    let cargo_toml = include_str!("../Cargo.toml");
    assert!(
        cargo_toml.contains("[profile.release]"),
        "Cargo.toml must have a [profile.release] section"
    );
    assert!(
        cargo_toml.contains("lto = true"),
        "Release profile must enable LTO"
    );
    assert!(
        cargo_toml.contains("strip = true"),
        "Release profile must strip symbols"
    );
    assert!(
        cargo_toml.contains("codegen-units = 1"),
        "Release profile must use single codegen unit"
    );
}

#[test]
fn windows_only_crates_are_target_gated() {
    let cargo_toml = include_str!("../Cargo.toml");
    let windows_section = cargo_toml
        .split("[target.'cfg(windows)'.dependencies]")
        .nth(1)
        .expect("Cargo.toml must have a Windows dependency section");
    assert!(
        windows_section.contains("windows-registry"),
        "Registry access must only be built on Windows"
    );
}
