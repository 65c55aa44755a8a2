/// Vocabulary used to recognise release files built for a platform
pub trait PlatformDescriptor {
    /// Names the operating system goes by in release file names
    fn operating_system_names(&self) -> Vec<String>;
    /// Names the CPU architecture goes by in release file names
    fn architecture_names(&self) -> Vec<String>;
    /// Extensions only ever shipped for this OS (e.g. `AppImage`, `exe`)
    fn os_specific_extensions(&self) -> Vec<String>;
}

/// Descriptor for the platform this binary was compiled for
#[derive(Debug, Default, Clone, Copy)]
pub struct RuntimePlatform;

impl PlatformDescriptor for RuntimePlatform {
    fn operating_system_names(&self) -> Vec<String> {
        os_names(std::env::consts::OS)
    }

    fn architecture_names(&self) -> Vec<String> {
        arch_names(std::env::consts::ARCH)
    }

    fn os_specific_extensions(&self) -> Vec<String> {
        os_extensions(std::env::consts::OS)
    }
}

fn os_names(os: &str) -> Vec<String> {
    let names: &[&str] = match os {
        "macos" => &["darwin", "macos"],
        "windows" => &["windows", "win"],
        other => return vec![other.to_string()],
    };
    names.iter().map(|s| s.to_string()).collect()
}

fn arch_names(arch: &str) -> Vec<String> {
    let names: &[&str] = match arch {
        "x86_64" => &["amd64", "x86_64", "x64"],
        "aarch64" => &["arm64", "aarch64"],
        "x86" => &["386", "i386", "i686"],
        "arm" => &["arm", "armv7"],
        other => return vec![other.to_string()],
    };
    names.iter().map(|s| s.to_string()).collect()
}

fn os_extensions(os: &str) -> Vec<String> {
    match os {
        "linux" => vec!["AppImage".to_string()],
        "windows" => vec!["exe".to_string()],
        _ => Vec::new(),
    }
}

/// Fixed descriptor, handy for resolving on behalf of another platform and in tests
#[derive(Debug, Default, Clone)]
pub struct StaticPlatform {
    pub os: Vec<String>,
    pub arch: Vec<String>,
    pub extensions: Vec<String>,
}

impl StaticPlatform {
    pub fn new(os: &[&str], arch: &[&str], extensions: &[&str]) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            os: owned(os),
            arch: owned(arch),
            extensions: owned(extensions),
        }
    }
}

impl PlatformDescriptor for StaticPlatform {
    fn operating_system_names(&self) -> Vec<String> {
        self.os.clone()
    }

    fn architecture_names(&self) -> Vec<String> {
        self.arch.clone()
    }

    fn os_specific_extensions(&self) -> Vec<String> {
        self.extensions.clone()
    }
}
