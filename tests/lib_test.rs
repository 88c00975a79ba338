//! Library integration tests.

use pier_scaffold::PierError;

#[test]
fn error_types_are_public() {
    let err = PierError::UnsupportedPhpVersion {
        version: "7.4".into(),
        available: "8.4, 8.5".into(),
    };
    assert!(err.to_string().contains("7.4"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> pier_scaffold::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use pier_scaffold::cli::{Cli, Commands};

    let cli = Cli::parse_from(["pier-scaffold", "install", "--php", "8.4"]);

    match cli.command {
        Commands::Install(args) => assert_eq!(args.php, "8.4"),
        _ => panic!("Expected Install command"),
    }
}

#[test]
fn bundled_runtimes_are_listed() {
    let versions = pier_scaffold::templates::runtime_versions();
    assert_eq!(versions, vec!["8.4", "8.5"]);
}

#[test]
fn compose_and_env_patching_work_together() {
    use pier_scaffold::compose::{ComposeBuilder, ComposeSettings};
    use pier_scaffold::patch::rewrite_env;

    let settings = ComposeSettings::default();
    let builder = ComposeBuilder::new(&settings);
    let mut doc = serde_yaml::Value::Null;
    let outcome = builder.merge(&mut doc).unwrap();
    assert!(outcome.missing_primary);

    let env = rewrite_env(b"DB_CONNECTION=mysql\n");
    assert_eq!(env, b"DB_CONNECTION=pgsql\n");
}
