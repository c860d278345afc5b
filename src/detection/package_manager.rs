//! System package manager detection.

use std::fmt;

use crate::requirements::probe::Tool;
use crate::shell::CommandSpec;

use super::distro::Distro;

/// Supported system package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Apt,
    Dnf,
    Yum,
    Pacman,
    Homebrew,
}

impl PackageManager {
    /// Executable that performs installs.
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Apt => "apt-get",
            PackageManager::Dnf => "dnf",
            PackageManager::Yum => "yum",
            PackageManager::Pacman => "pacman",
            PackageManager::Homebrew => "brew",
        }
    }

    /// Package names that provide `tool`.
    pub fn packages_for(&self, tool: Tool) -> &'static [&'static str] {
        match (self, tool) {
            (_, Tool::Git) => &["git"],
            (PackageManager::Apt, Tool::Php) => &["php-cli", "php-curl", "php-mbstring"],
            (PackageManager::Dnf | PackageManager::Yum, Tool::Php) => &["php-cli", "php-mbstring"],
            (PackageManager::Pacman | PackageManager::Homebrew, Tool::Php) => &["php"],
            (_, Tool::Arcanist) => &[],
        }
    }

    /// Whether installs through this manager need root.
    pub fn needs_root(&self) -> bool {
        !matches!(self, PackageManager::Homebrew)
    }

    /// Build the install command for `packages`.
    ///
    /// `sudo` is prepended when the manager needs root and the current user
    /// is not already root.
    pub fn install_command(&self, packages: &[String], elevated: bool) -> CommandSpec {
        let mut args: Vec<String> = match self {
            PackageManager::Apt | PackageManager::Dnf | PackageManager::Yum => {
                vec!["install".into(), "-y".into()]
            }
            PackageManager::Pacman => vec!["-S".into(), "--noconfirm".into(), "--needed".into()],
            PackageManager::Homebrew => vec!["install".into()],
        };
        args.extend(packages.iter().cloned());

        if self.needs_root() && !elevated {
            CommandSpec::new("sudo").arg(self.program()).args(args)
        } else {
            CommandSpec::new(self.program()).args(args)
        }
    }

    /// The manager a distribution ships with.
    pub fn for_distro(distro: &Distro) -> Option<Self> {
        if distro.is_like("debian") || distro.is_like("ubuntu") {
            Some(PackageManager::Apt)
        } else if distro.is_like("fedora") || distro.is_like("rhel") || distro.is_like("centos") {
            Some(PackageManager::Dnf)
        } else if distro.is_like("arch") {
            Some(PackageManager::Pacman)
        } else {
            None
        }
    }

    /// Detect the package manager of the host.
    ///
    /// The distribution's native manager wins when it is on PATH; otherwise
    /// the first manager found on PATH is used. `on_path` reports whether an
    /// executable is resolvable.
    pub fn detect(distro: Option<&Distro>, on_path: impl Fn(&str) -> bool) -> Option<Self> {
        if cfg!(target_os = "macos") {
            return on_path("brew").then_some(PackageManager::Homebrew);
        }

        if let Some(native) = distro.and_then(Self::for_distro) {
            if on_path(native.program()) {
                return Some(native);
            }
            // Older RHEL derivatives ship yum only.
            if native == PackageManager::Dnf && on_path("yum") {
                return Some(PackageManager::Yum);
            }
        }

        [
            PackageManager::Apt,
            PackageManager::Dnf,
            PackageManager::Yum,
            PackageManager::Pacman,
            PackageManager::Homebrew,
        ]
        .into_iter()
        .find(|pm| on_path(pm.program()))
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::distro::parse_os_release;

    fn names(packages: &[&str]) -> Vec<String> {
        packages.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn apt_package_names() {
        assert_eq!(PackageManager::Apt.packages_for(Tool::Git), &["git"]);
        assert_eq!(
            PackageManager::Apt.packages_for(Tool::Php),
            &["php-cli", "php-curl", "php-mbstring"]
        );
        assert!(PackageManager::Apt.packages_for(Tool::Arcanist).is_empty());
    }

    #[test]
    fn install_command_uses_sudo_when_not_root() {
        let cmd = PackageManager::Apt.install_command(&names(&["git", "php-cli"]), false);
        assert_eq!(cmd.display_line(), "sudo apt-get install -y git php-cli");
    }

    #[test]
    fn install_command_skips_sudo_when_root() {
        let cmd = PackageManager::Dnf.install_command(&names(&["git"]), true);
        assert_eq!(cmd.display_line(), "dnf install -y git");
    }

    #[test]
    fn homebrew_never_uses_sudo() {
        let cmd = PackageManager::Homebrew.install_command(&names(&["php"]), false);
        assert_eq!(cmd.display_line(), "brew install php");
    }

    #[test]
    fn pacman_install_flags() {
        let cmd = PackageManager::Pacman.install_command(&names(&["php"]), true);
        assert_eq!(cmd.display_line(), "pacman -S --noconfirm --needed php");
    }

    #[test]
    fn distro_mapping() {
        let debian = parse_os_release("ID=debian\n").unwrap();
        let mint = parse_os_release("ID=linuxmint\nID_LIKE=\"ubuntu debian\"\n").unwrap();
        let fedora = parse_os_release("ID=fedora\n").unwrap();
        let arch = parse_os_release("ID=arch\n").unwrap();
        let unknown = parse_os_release("ID=plan9\n").unwrap();

        assert_eq!(PackageManager::for_distro(&debian), Some(PackageManager::Apt));
        assert_eq!(PackageManager::for_distro(&mint), Some(PackageManager::Apt));
        assert_eq!(PackageManager::for_distro(&fedora), Some(PackageManager::Dnf));
        assert_eq!(PackageManager::for_distro(&arch), Some(PackageManager::Pacman));
        assert_eq!(PackageManager::for_distro(&unknown), None);
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn detect_prefers_native_manager() {
        let ubuntu = parse_os_release("ID=ubuntu\nID_LIKE=debian\n").unwrap();
        let found = PackageManager::detect(Some(&ubuntu), |p| p == "apt-get" || p == "pacman");
        assert_eq!(found, Some(PackageManager::Apt));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn detect_falls_back_to_yum() {
        let centos = parse_os_release("ID=centos\nID_LIKE=\"rhel fedora\"\n").unwrap();
        let found = PackageManager::detect(Some(&centos), |p| p == "yum");
        assert_eq!(found, Some(PackageManager::Yum));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn detect_without_distro_scans_path() {
        let found = PackageManager::detect(None, |p| p == "pacman");
        assert_eq!(found, Some(PackageManager::Pacman));
        assert_eq!(PackageManager::detect(None, |_| false), None);
    }
}
