//! `.env` defaults for the installed services.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::Result;
use crate::templates;

use super::rewrite::{Rewrite, RewriteSet};

/// Name of the project's environment file.
pub const ENV_FILE: &str = ".env";

/// Name of the Traefik routing file installed next to the compose file.
pub const TRAEFIK_DOMAINS_FILE: &str = "traefik-domains.yml";

const fn literal(from: &'static str, to: &'static str) -> Rewrite {
    Rewrite::Literal { from, to }
}

const fn pattern(pattern: &'static str, replacement: &'static str) -> Rewrite {
    Rewrite::Pattern {
        pattern,
        replacement,
    }
}

/// Substitutions applied to `.env`, in order.
pub const ENV_REWRITES: &[Rewrite] = &[
    // PostgreSQL
    literal("# DB_HOST=127.0.0.1", "DB_HOST=127.0.0.1"),
    literal("# DB_PORT=3306", "DB_PORT=3306"),
    literal("# DB_DATABASE=laravel", "DB_DATABASE=laravel"),
    literal("# DB_USERNAME=root", "DB_USERNAME=root"),
    literal("# DB_PASSWORD=", "DB_PASSWORD="),
    pattern(r"DB_CONNECTION=.*", "DB_CONNECTION=pgsql"),
    literal("DB_HOST=127.0.0.1", "DB_HOST=pgsql"),
    literal("DB_PORT=3306", "DB_PORT=5432"),
    literal("DB_USERNAME=root", "DB_USERNAME=pier"),
    pattern(r"DB_PASSWORD=(.*)", "DB_PASSWORD=password"),
    // Valkey
    literal("REDIS_HOST=127.0.0.1", "REDIS_HOST=valkey"),
    // Soketi
    pattern(r"(?m)^BROADCAST_DRIVER=(.*)", "BROADCAST_DRIVER=pusher"),
    pattern(r"(?m)^PUSHER_APP_ID=(.*)", "PUSHER_APP_ID=app-id"),
    pattern(r"(?m)^PUSHER_APP_KEY=(.*)", "PUSHER_APP_KEY=app-key"),
    pattern(r"(?m)^PUSHER_APP_SECRET=(.*)", "PUSHER_APP_SECRET=app-secret"),
    pattern(r"(?m)^PUSHER_HOST=(.*)", "PUSHER_HOST=soketi"),
    pattern(r"(?m)^PUSHER_PORT=(.*)", "PUSHER_PORT=6001"),
    pattern(r"(?m)^PUSHER_SCHEME=(.*)", "PUSHER_SCHEME=http"),
    pattern(r"(?m)^VITE_PUSHER_HOST=(.*)", "VITE_PUSHER_HOST=localhost"),
    // Mailpit
    pattern(r"(?m)^MAIL_MAILER=(.*)", "MAIL_MAILER=smtp"),
    pattern(r"(?m)^MAIL_HOST=(.*)", "MAIL_HOST=mailpit"),
    pattern(r"(?m)^MAIL_PORT=(.*)", "MAIL_PORT=1025"),
    // Concurrent `artisan serve` workers
    literal("# PHP_CLI_SERVER_WORKERS=4", "PHP_CLI_SERVER_WORKERS=4"),
];

static ENV_RULES: LazyLock<RewriteSet> =
    LazyLock::new(|| RewriteSet::new(ENV_REWRITES).expect("ENV_REWRITES must compile"));

/// Rewrite `.env` content so the installed containers are used.
///
/// # Example
///
/// ```
/// use pier_scaffold::patch::rewrite_env;
///
/// let env = b"DB_CONNECTION=sqlite\n# DB_HOST=127.0.0.1\nAPP_NAME=Shop\n";
/// let patched = rewrite_env(env);
/// assert_eq!(patched, b"DB_CONNECTION=pgsql\nDB_HOST=pgsql\nAPP_NAME=Shop\n");
/// ```
pub fn rewrite_env(content: &[u8]) -> Vec<u8> {
    ENV_RULES.apply(content)
}

/// Result of patching a project's `.env`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvPatchReport {
    /// The rewritten environment file.
    pub env_path: PathBuf,
    /// Whether the content changed.
    pub changed: bool,
    /// Set when `traefik-domains.yml` was created by this run.
    pub installed_domains: Option<PathBuf>,
}

/// Rewrite `<project>/.env` in place and install the Traefik routing file.
///
/// The routing file is installed whether or not Traefik is one of the
/// requested services.
pub fn patch_env_file(project_root: &Path) -> Result<EnvPatchReport> {
    let env_path = project_root.join(ENV_FILE);
    let original = fs::read(&env_path)?;
    let patched = rewrite_env(&original);

    let installed_domains = install_traefik_domains(project_root)?;

    let changed = patched != original;
    fs::write(&env_path, &patched)?;
    tracing::debug!("Rewrote {} (changed: {})", env_path.display(), changed);

    Ok(EnvPatchReport {
        env_path,
        changed,
        installed_domains,
    })
}

/// Copy the bundled `traefik-domains.yml` into the project if it is absent.
pub fn install_traefik_domains(project_root: &Path) -> Result<Option<PathBuf>> {
    let path = project_root.join(TRAEFIK_DOMAINS_FILE);
    if path.exists() {
        return Ok(None);
    }

    fs::write(&path, templates::stub("traefik-domains")?)?;
    tracing::debug!("Installed {}", path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PierError;
    use tempfile::TempDir;

    fn rewrite(content: &str) -> String {
        String::from_utf8(rewrite_env(content.as_bytes())).unwrap()
    }

    const LARAVEL_ENV: &str = "\
APP_NAME=Laravel
APP_ENV=local
APP_URL=http://localhost

LOG_CHANNEL=stack

DB_CONNECTION=sqlite
# DB_HOST=127.0.0.1
# DB_PORT=3306
# DB_DATABASE=laravel
# DB_USERNAME=root
# DB_PASSWORD=

BROADCAST_DRIVER=log
REDIS_HOST=127.0.0.1
REDIS_PORT=6379

MAIL_MAILER=log
MAIL_HOST=127.0.0.1
MAIL_PORT=2525

PUSHER_APP_ID=
PUSHER_APP_KEY=
PUSHER_APP_SECRET=
PUSHER_HOST=
PUSHER_PORT=443
PUSHER_SCHEME=https

VITE_APP_NAME=\"${APP_NAME}\"
VITE_PUSHER_HOST=\"${PUSHER_HOST}\"

# PHP_CLI_SERVER_WORKERS=4
";

    #[test]
    fn database_defaults_are_uncommented_and_rehosted() {
        let patched = rewrite("# DB_HOST=127.0.0.1\nDB_CONNECTION=sqlite\n");
        assert_eq!(patched, "DB_HOST=pgsql\nDB_CONNECTION=pgsql\n");
    }

    #[test]
    fn full_laravel_env_is_rewritten() {
        let patched = rewrite(LARAVEL_ENV);

        for expected in [
            "DB_CONNECTION=pgsql",
            "DB_HOST=pgsql",
            "DB_PORT=5432",
            "DB_DATABASE=laravel",
            "DB_USERNAME=pier",
            "DB_PASSWORD=password",
            "REDIS_HOST=valkey",
            "BROADCAST_DRIVER=pusher",
            "PUSHER_APP_ID=app-id",
            "PUSHER_APP_KEY=app-key",
            "PUSHER_APP_SECRET=app-secret",
            "PUSHER_HOST=soketi",
            "PUSHER_PORT=6001",
            "PUSHER_SCHEME=http",
            "VITE_PUSHER_HOST=localhost",
            "MAIL_MAILER=smtp",
            "MAIL_HOST=mailpit",
            "MAIL_PORT=1025",
        ] {
            assert!(
                patched.lines().any(|l| l == expected),
                "missing line {}",
                expected
            );
        }
        assert!(patched.lines().any(|l| l == "PHP_CLI_SERVER_WORKERS=4"));
        assert!(!patched.contains("# PHP_CLI_SERVER_WORKERS"));
    }

    #[test]
    fn unrelated_lines_are_byte_identical() {
        let patched = rewrite(LARAVEL_ENV);

        for line in [
            "APP_NAME=Laravel",
            "APP_ENV=local",
            "APP_URL=http://localhost",
            "LOG_CHANNEL=stack",
            "REDIS_PORT=6379",
            "VITE_APP_NAME=\"${APP_NAME}\"",
        ] {
            assert!(patched.lines().any(|l| l == line), "lost line {}", line);
        }
        assert_eq!(patched.lines().count(), LARAVEL_ENV.lines().count());
    }

    #[test]
    fn anchored_keys_ignore_prefixed_variables() {
        let patched = rewrite("VITE_MAIL_HOST=x\nMAIL_HOST=smtp.example.com\n");
        assert_eq!(patched, "VITE_MAIL_HOST=x\nMAIL_HOST=mailpit\n");
    }

    #[test]
    fn rewriting_twice_is_stable() {
        let once = rewrite(LARAVEL_ENV);
        let twice = rewrite(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn patch_env_file_writes_in_place() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(ENV_FILE), LARAVEL_ENV).unwrap();

        let report = patch_env_file(temp.path()).unwrap();

        assert!(report.changed);
        let written = fs::read_to_string(temp.path().join(ENV_FILE)).unwrap();
        assert_eq!(written, rewrite(LARAVEL_ENV));
    }

    #[test]
    fn non_utf8_lines_survive_byte_identical() {
        let temp = TempDir::new().unwrap();
        let env_path = temp.path().join(ENV_FILE);
        fs::write(
            &env_path,
            b"APP_NAME=Caf\xe9\nDB_CONNECTION=sqlite\nDB_PASSWORD=p\xe4ss\n",
        )
        .unwrap();

        let report = patch_env_file(temp.path()).unwrap();

        assert!(report.changed);
        assert_eq!(
            fs::read(&env_path).unwrap(),
            b"APP_NAME=Caf\xe9\nDB_CONNECTION=pgsql\nDB_PASSWORD=password\n"
        );
    }

    #[test]
    fn patch_env_file_installs_domains_once() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(ENV_FILE), "APP_NAME=Shop\n").unwrap();

        let first = patch_env_file(temp.path()).unwrap();
        assert_eq!(
            first.installed_domains,
            Some(temp.path().join(TRAEFIK_DOMAINS_FILE))
        );

        fs::write(temp.path().join(TRAEFIK_DOMAINS_FILE), "http: {}\n").unwrap();
        let second = patch_env_file(temp.path()).unwrap();

        assert_eq!(second.installed_domains, None);
        assert_eq!(
            fs::read_to_string(temp.path().join(TRAEFIK_DOMAINS_FILE)).unwrap(),
            "http: {}\n"
        );
    }

    #[test]
    fn missing_env_file_is_fatal() {
        let temp = TempDir::new().unwrap();

        let err = patch_env_file(temp.path()).unwrap_err();

        assert!(matches!(err, PierError::Io(_)));
        assert!(!temp.path().join(TRAEFIK_DOMAINS_FILE).exists());
    }
}
