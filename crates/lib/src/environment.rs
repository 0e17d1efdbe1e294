//! Environments handed to build commands.

use std::collections::BTreeMap;

use crate::consts::TCROOT_ENV;
use crate::host::{HostFamily, HostType};

/// Variables passed through from the inherited environment on every host.
const SAFE_VARS: &[&str] = &["PATH", "HOME", "USER", "LOGNAME", "LANG", "LC_ALL", "TMPDIR", "TCROOT", "SHELL"];

/// Additional variables windows tools expect.
const SAFE_WINDOWS_VARS: &[&str] = &["SYSTEMROOT", "COMSPEC", "PATHEXT", "TEMP", "TMP"];

/// The inherited environment restricted to variables that are safe to pass
/// to a build step. `PATH` is always present, possibly empty.
pub fn safe_environment(host: &HostType) -> BTreeMap<String, String> {
  let windows: &[&str] = if host.is_windows() { SAFE_WINDOWS_VARS } else { &[] };

  let mut env: BTreeMap<String, String> = SAFE_VARS
    .iter()
    .chain(windows)
    .filter_map(|name| std::env::var(name).ok().map(|value| (name.to_string(), value)))
    .collect();

  env.entry("PATH".to_string()).or_default();
  env
}

/// The toolchain root from `TCROOT`, or `fallback` when the variable is unset.
///
/// A set value is always used, even if it is empty or not valid unicode.
pub fn tcroot_or(fallback: &str) -> String {
  match std::env::var_os(TCROOT_ENV) {
    Some(value) => value.to_string_lossy().into_owned(),
    None => fallback.to_string(),
  }
}

/// Rebuild `PATH` as `head`, then the current value, then `tail`, joined with
/// the host's separator. An empty current value is dropped.
pub fn prepend_paths<H, T>(env: &mut BTreeMap<String, String>, host: &HostType, head: H, tail: T)
where
  H: IntoIterator<Item = String>,
  T: IntoIterator<Item = String>,
{
  let separator = host.family().unwrap_or(HostFamily::Linux).path_separator().to_string();
  let inherited = env.remove("PATH").filter(|path| !path.is_empty());

  let paths: Vec<String> = head.into_iter().chain(inherited).chain(tail).collect();
  env.insert("PATH".to_string(), paths.join(&separator));
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn only_safe_vars_are_inherited() {
    temp_env::with_vars(
      [
        ("PATH", Some("/usr/bin")),
        ("HOME", Some("/home/mts")),
        ("AWS_SECRET_ACCESS_KEY", Some("hunter2")),
      ],
      || {
        let env = safe_environment(&HostType::from("linux64"));
        assert_eq!(env.get("PATH").map(String::as_str), Some("/usr/bin"));
        assert_eq!(env.get("HOME").map(String::as_str), Some("/home/mts"));
        assert!(!env.contains_key("AWS_SECRET_ACCESS_KEY"));
      },
    );
  }

  #[test]
  #[serial]
  fn windows_vars_only_for_windows_hosts() {
    temp_env::with_var("SYSTEMROOT", Some("C:/Windows"), || {
      assert!(!safe_environment(&HostType::from("linux64")).contains_key("SYSTEMROOT"));
      assert_eq!(
        safe_environment(&HostType::from("windows64")).get("SYSTEMROOT").map(String::as_str),
        Some("C:/Windows")
      );
    });
  }

  #[test]
  #[serial]
  fn path_is_always_present() {
    temp_env::with_var_unset("PATH", || {
      assert_eq!(safe_environment(&HostType::from("linux64")).get("PATH").map(String::as_str), Some(""));
    });
  }

  mod tcroot {
    use super::*;

    #[test]
    #[serial]
    fn unset_uses_fallback() {
      temp_env::with_var_unset(TCROOT_ENV, || {
        assert_eq!(tcroot_or("/fallback"), "/fallback");
      });
    }

    #[test]
    #[serial]
    fn empty_value_is_kept() {
      temp_env::with_var(TCROOT_ENV, Some(""), || {
        assert_eq!(tcroot_or("/fallback"), "");
      });
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn non_unicode_value_is_kept() {
      use std::ffi::OsStr;
      use std::os::unix::ffi::OsStrExt;

      temp_env::with_var(TCROOT_ENV, Some(OsStr::from_bytes(b"/tc\xff")), || {
        let tcroot = tcroot_or("/fallback");
        assert!(tcroot.starts_with("/tc"));
        assert_ne!(tcroot, "/fallback");
      });
    }
  }

  #[test]
  fn prepend_keeps_order() {
    let mut env = BTreeMap::from([("PATH".to_string(), "/usr/bin".to_string())]);
    prepend_paths(
      &mut env,
      &HostType::from("linux64"),
      vec!["/tc/a".to_string(), "/tc/b".to_string()],
      vec!["/bin".to_string()],
    );
    assert_eq!(env["PATH"], "/tc/a:/tc/b:/usr/bin:/bin");
  }

  #[test]
  fn prepend_drops_empty_inherited_path() {
    let mut env = BTreeMap::from([("PATH".to_string(), String::new())]);
    prepend_paths(&mut env, &HostType::from("linux64"), vec!["/tc".to_string()], vec!["/bin".to_string()]);
    assert_eq!(env["PATH"], "/tc:/bin");
  }

  #[test]
  fn prepend_uses_windows_separator() {
    let mut env = BTreeMap::new();
    prepend_paths(
      &mut env,
      &HostType::from("windows64"),
      vec!["C:/tc".to_string()],
      vec!["C:/Windows".to_string()],
    );
    assert_eq!(env["PATH"], "C:/tc;C:/Windows");
  }
}
