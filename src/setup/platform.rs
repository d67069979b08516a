//! Host platform detection.

use std::collections::HashMap;
use std::path::Path;

/// Package-manager family of a Linux distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinuxFamily {
    Arch,
    Debian,
    Fedora,
    OpenSuse,
}

impl LinuxFamily {
    pub fn label(self) -> &'static str {
        match self {
            LinuxFamily::Arch => "Arch-based",
            LinuxFamily::Debian => "Debian/Ubuntu-based",
            LinuxFamily::Fedora => "Fedora-based",
            LinuxFamily::OpenSuse => "openSUSE-based",
        }
    }
}

/// Operating system the tool is running on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// Linux, with the distribution family when it is one we can install on.
    Linux {
        id: String,
        family: Option<LinuxFamily>,
    },
    MacOs,
    Windows,
    Unsupported(String),
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Linux {
                family: Some(family),
                ..
            } => write!(f, "{}", family.label()),
            Platform::Linux { id, family: None } => {
                write!(f, "Unsupported Linux Distribution ({})", id)
            }
            Platform::MacOs => write!(f, "macOS"),
            Platform::Windows => write!(f, "Windows"),
            Platform::Unsupported(os) => write!(f, "Unsupported OS ({})", os),
        }
    }
}

/// Parse `os-release` key/value pairs, stripping optional quotes.
pub fn parse_os_release(content: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    let re = match regex::Regex::new(r"^([A-Z0-9_]+)=(.*)$") {
        Ok(re) => re,
        Err(_) => return fields,
    };

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(caps) = re.captures(line) {
            let value = caps[2].trim().trim_matches(|c: char| c == '"' || c == '\'');
            fields.insert(caps[1].to_string(), value.to_string());
        }
    }

    fields
}

/// Map a single distribution id to its family.
pub fn family_from_id(id: &str) -> Option<LinuxFamily> {
    let id = id.to_lowercase();
    match id.as_str() {
        "arch" | "manjaro" | "endeavouros" => Some(LinuxFamily::Arch),
        "debian" | "ubuntu" | "pop" | "linuxmint" => Some(LinuxFamily::Debian),
        "fedora" | "rhel" | "centos" | "rocky" | "almalinux" => Some(LinuxFamily::Fedora),
        "opensuse" | "suse" | "sles" => Some(LinuxFamily::OpenSuse),
        other if other.starts_with("opensuse") => Some(LinuxFamily::OpenSuse),
        _ => None,
    }
}

/// Determine the Linux family from `os-release` contents.
///
/// `ID` wins; `ID_LIKE` is consulted for derivatives we do not list by name.
pub fn linux_from_os_release(content: &str) -> Platform {
    let fields = parse_os_release(content);
    let id = fields
        .get("ID")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "unknown".to_string());

    let family = family_from_id(&id).or_else(|| {
        fields
            .get("ID_LIKE")
            .and_then(|like| like.split_whitespace().find_map(family_from_id))
    });

    Platform::Linux { id, family }
}

/// Detect the platform of the running host.
pub fn detect() -> Platform {
    match std::env::consts::OS {
        "linux" => {
            let content = ["/etc/os-release", "/usr/lib/os-release"]
                .iter()
                .find_map(|p| std::fs::read_to_string(Path::new(p)).ok())
                .unwrap_or_default();
            linux_from_os_release(&content)
        }
        "macos" => Platform::MacOs,
        "windows" => Platform::Windows,
        other => Platform::Unsupported(other.to_string()),
    }
}
