//! Debian package names for Go import paths

use crate::domain::PackageType;
use crate::error::ConfigError;

/// Canonical short names of code hosters, sorted by host
const KNOWN_HOSTS: &[(&str, &str)] = &[
    ("bazil.org", "bazil"),
    ("bitbucket.org", "bitbucket"),
    ("blitiri.com.ar", "blitiri"),
    ("cloud.google.com", "googlecloud"),
    ("code.google.com", "googlecode"),
    ("codeberg.org", "codeberg"),
    ("filippo.io", "filippo"),
    ("fortio.org", "fortio"),
    ("fyne.io", "fyne"),
    ("git.sr.ht", "sourcehut"),
    ("github.com", "github"),
    ("gitlab.com", "gitlab"),
    ("go.bug.st", "bugst"),
    ("go.cypherpunks.ru", "cypherpunks"),
    ("go.mongodb.org", "mongodb"),
    ("go.opentelemetry.io", "opentelemetry"),
    ("go.step.sm", "step"),
    ("go.uber.org", "uber"),
    ("go4.org", "go4"),
    ("gocloud.dev", "gocloud"),
    ("golang.org", "golang"),
    ("google.golang.org", "google"),
    ("gopkg.in", "gopkg"),
    ("honnef.co", "honnef"),
    ("howett.net", "howett"),
    ("k8s.io", "k8s"),
    ("modernc.org", "modernc"),
    ("pault.ag", "pault"),
    ("rsc.io", "rsc"),
    ("salsa.debian.org", "debian"),
    ("sigs.k8s.io", "k8s-sigs"),
    ("software.sslmate.com", "sslmate"),
];

/// Make `name` a valid Debian package name
///
/// Lowercases ASCII letters, maps `_` to `-`, keeps digits and `.+-`, drops
/// everything else and trims leading/trailing `-`. Results shorter than two
/// characters become `TODO`.
pub fn normalize_package_name(name: &str) -> String {
    let mapped: String = name
        .chars()
        .filter_map(|c| match c {
            'a'..='z' | '0'..='9' | '.' | '+' | '-' => Some(c),
            'A'..='Z' => Some(c.to_ascii_lowercase()),
            '_' => Some('-'),
            _ => None,
        })
        .collect();

    let safe = mapped.trim_matches('-');
    if safe.len() < 2 {
        return "TODO".to_string();
    }
    safe.to_string()
}

/// Short name of the hoster of `import_path`, e.g. `github` for github.com
///
/// Unknown hosters are an error unless `allow_unknown_hoster` is set, in
/// which case the host without its top-level label is used.
pub fn short_host_name(import_path: &str, allow_unknown_hoster: bool) -> Result<String, ConfigError> {
    let fqdn = import_path.split('/').next().unwrap_or_default();

    if let Ok(idx) = KNOWN_HOSTS.binary_search_by(|(host, _)| host.cmp(&fqdn)) {
        return Ok(KNOWN_HOSTS[idx].1.to_string());
    }

    if !allow_unknown_hoster {
        return Err(ConfigError::UnknownHoster {
            host: fqdn.to_string(),
        });
    }

    let host = fqdn.rsplit_once('.').map_or(fqdn, |(head, _)| head);
    log::warn!(
        "Using {:?} as canonical hostname for {:?}. If that is not okay, please file a bug.",
        host,
        fqdn
    );
    Ok(host.to_string())
}

/// Debian package name for `import_path`
///
/// Programs are named after the last path element (or `custom_program_name`);
/// libraries follow the `golang-{host}-{path}` convention, e.g.
/// `golang.org/x/text` becomes `golang-golang-x-text`.
pub fn debian_package_name(
    import_path: &str,
    package_type: PackageType,
    custom_program_name: Option<&str>,
    allow_unknown_hoster: bool,
) -> Result<String, ConfigError> {
    if package_type.is_program_first() {
        if let Some(custom) = custom_program_name.filter(|n| !n.is_empty()) {
            return Ok(normalize_package_name(custom));
        }
        let last = import_path.rsplit('/').next().unwrap_or(import_path);
        return Ok(normalize_package_name(last));
    }

    let host = short_host_name(import_path, allow_unknown_hoster)?;
    let mut parts: Vec<&str> = import_path.split('/').collect();
    parts[0] = &host;

    Ok(normalize_package_name(&format!("golang-{}", parts.join("-"))))
}
