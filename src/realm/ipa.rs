use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::debug;

use super::runner::{CommandRunner, ShellRunner};
use super::RealmError;

const DEFAULT_BINARY: &str = "/usr/bin/ipa";
const PASSWORD_LEN: usize = 8;

/// Client for `ipa host-*` commands against one fully-qualified host.
///
/// Built via [`IpaClient::builder`]; `fqdn`, `tsig_keytab` and
/// `tsig_principal` are required, and the keytab must exist on disk.
/// Obtaining a Kerberos ticket from the keytab is left to the host
/// process; this client only composes commands and screens their output.
#[derive(Debug)]
pub struct IpaClient {
    fqdn: String,
    tsig_keytab: PathBuf,
    tsig_principal: String,
    binary: PathBuf,
    runner: Box<dyn CommandRunner>,
    password: Option<String>,
}

impl IpaClient {
    pub fn builder() -> IpaClientBuilder {
        IpaClientBuilder::default()
    }

    pub fn fqdn(&self) -> &str {
        &self.fqdn
    }

    pub fn tsig_keytab(&self) -> &Path {
        &self.tsig_keytab
    }

    pub fn tsig_principal(&self) -> &str {
        &self.tsig_principal
    }

    /// One-time password generated by the last [`host_add`](Self::host_add).
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Looks up the host record.
    pub fn host_find(&self) -> Result<String, RealmError> {
        self.ipa("host-find", &[])
    }

    /// Adds the host record with a freshly generated enrollment password.
    ///
    /// `ipa host-add` cannot generate a password without enrolling the
    /// host, so the client generates one and keeps it for the caller.
    pub fn host_add(&mut self) -> Result<String, RealmError> {
        let password = random_password(PASSWORD_LEN);
        let output = self.ipa("host-add", &[format!("--password={password}")])?;
        self.password = Some(password);
        Ok(output)
    }

    /// Deletes the host record.
    pub fn host_del(&self) -> Result<String, RealmError> {
        self.ipa("host-del", &[])
    }

    fn ipa(&self, command: &str, extra: &[String]) -> Result<String, RealmError> {
        let mut args = vec![command.to_string(), self.fqdn.clone()];
        args.extend_from_slice(extra);

        debug!("running {} {}", self.binary.display(), args.join(" "));
        let output = self.runner.run(&self.binary, &args)?;

        if output.is_empty() || contains_ignore_case(&output, "error") {
            debug!("ipa {command} failed for {}: {output}", self.fqdn);
            if contains_ignore_case(&output, "insufficient access") {
                return Err(RealmError::Kerberos(output));
            }
            return Err(RealmError::Command(output));
        }

        debug!("ipa {command} output: {output}");
        Ok(output)
    }
}

/// Builder for [`IpaClient`].
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct IpaClientBuilder {
    fqdn: Option<String>,
    tsig_keytab: Option<PathBuf>,
    tsig_principal: Option<String>,
    binary: Option<PathBuf>,
    runner: Option<Box<dyn CommandRunner>>,
}

impl IpaClientBuilder {
    /// Fully-qualified name of the host to manage.
    pub fn fqdn(mut self, fqdn: impl Into<String>) -> Self {
        self.fqdn = Some(fqdn.into());
        self
    }

    /// Keytab file backing GSS-TSIG authentication. Must exist on disk.
    pub fn tsig_keytab(mut self, path: impl AsRef<Path>) -> Self {
        self.tsig_keytab = Some(path.as_ref().to_path_buf());
        self
    }

    /// Kerberos principal matching the keytab.
    pub fn tsig_principal(mut self, principal: impl Into<String>) -> Self {
        self.tsig_principal = Some(principal.into());
        self
    }

    /// Path to the `ipa` binary; defaults to `/usr/bin/ipa`.
    pub fn binary(mut self, path: impl AsRef<Path>) -> Self {
        self.binary = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn runner(mut self, runner: Box<dyn CommandRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    pub fn build(self) -> Result<IpaClient, RealmError> {
        let fqdn = self.fqdn.ok_or(RealmError::MissingSetting("fqdn"))?;
        let tsig_keytab = self
            .tsig_keytab
            .ok_or(RealmError::MissingSetting("tsig_keytab"))?;
        let tsig_principal = self
            .tsig_principal
            .ok_or(RealmError::MissingSetting("tsig_principal"))?;

        if !tsig_keytab.exists() {
            return Err(RealmError::KeytabNotFound(tsig_keytab));
        }

        debug!("ipa client for {fqdn} (principal {tsig_principal})");
        Ok(IpaClient {
            fqdn,
            tsig_keytab,
            tsig_principal,
            binary: self.binary.unwrap_or_else(|| PathBuf::from(DEFAULT_BINARY)),
            runner: self.runner.unwrap_or_else(|| Box::new(ShellRunner)),
            password: None,
        })
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn random_password(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(b'A' + rng.random_range(0u8..26)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tempfile::NamedTempFile;

    type Calls = Arc<Mutex<Vec<Vec<String>>>>;

    #[derive(Debug)]
    struct CannedRunner {
        output: &'static str,
        calls: Calls,
    }

    impl CommandRunner for CannedRunner {
        fn run(&self, _binary: &Path, args: &[String]) -> std::io::Result<String> {
            self.calls.lock().unwrap().push(args.to_vec());
            Ok(self.output.to_string())
        }
    }

    fn client_with(output: &'static str) -> (IpaClient, Calls, NamedTempFile) {
        let keytab = NamedTempFile::new().unwrap();
        let calls = Calls::default();
        let client = IpaClient::builder()
            .fqdn("host.example.com")
            .tsig_keytab(keytab.path())
            .tsig_principal("admin@EXAMPLE.COM")
            .runner(Box::new(CannedRunner {
                output,
                calls: Arc::clone(&calls),
            }))
            .build()
            .unwrap();
        (client, calls, keytab)
    }

    #[test]
    fn test_build_requires_settings() {
        let result = IpaClient::builder().fqdn("h.example.com").build();
        assert!(matches!(
            result,
            Err(RealmError::MissingSetting("tsig_keytab"))
        ));
    }

    #[test]
    fn test_build_requires_existing_keytab() {
        let result = IpaClient::builder()
            .fqdn("h.example.com")
            .tsig_keytab("/nonexistent/krb5.keytab")
            .tsig_principal("admin@EXAMPLE.COM")
            .build();
        assert!(matches!(result, Err(RealmError::KeytabNotFound(_))));
    }

    #[test]
    fn test_host_find_composes_command() {
        let (client, calls, _keytab) = client_with("Host name: host.example.com\n");
        client.host_find().unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], vec!["host-find", "host.example.com"]);
    }

    #[test]
    fn test_host_add_generates_password() {
        let (mut client, calls, _keytab) = client_with("Added host \"host.example.com\"\n");
        client.host_add().unwrap();

        let password = client.password().unwrap().to_string();
        assert_eq!(password.len(), 8);
        assert!(password.chars().all(|c| c.is_ascii_uppercase()));

        let calls = calls.lock().unwrap();
        assert_eq!(
            calls[0],
            vec![
                "host-add".to_string(),
                "host.example.com".to_string(),
                format!("--password={password}"),
            ]
        );
    }

    #[test]
    fn test_error_marker_is_screened() {
        let (client, _calls, _keytab) = client_with("ipa: ERROR: host not found\n");
        assert!(matches!(client.host_find(), Err(RealmError::Command(_))));
    }

    #[test]
    fn test_insufficient_access_is_kerberos() {
        let (client, _calls, _keytab) = client_with("ipa: ERROR: Insufficient access: denied\n");
        assert!(matches!(client.host_del(), Err(RealmError::Kerberos(_))));
    }

    #[test]
    fn test_empty_output_is_failure() {
        let (client, _calls, _keytab) = client_with("");
        assert!(matches!(client.host_find(), Err(RealmError::Command(_))));
    }
}
