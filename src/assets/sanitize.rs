use crate::platform::PlatformDescriptor;

/// Strip OS, architecture and version decoration from a release file name
///
/// e.g. "gitlab-runner-linux-amd64" -> "gitlab-runner", "launchpad-win-x64.exe" -> "launchpad.exe"
pub fn sanitize_name(platform: &dyn PlatformDescriptor, name: &str, version: &str) -> String {
    let name = name.to_lowercase();
    let os_names: Vec<String> = lower(platform.operating_system_names());
    let arch_names: Vec<String> = lower(platform.architecture_names());

    let mut patterns = Vec::new();
    for (i, os) in os_names.iter().enumerate() {
        for arch in &arch_names {
            patterns.extend(separated(&format!("{os}{arch}"), &["_", "-", "."]));

            // Bare architectures are only added once, e.g. "bin-amd64"
            if i == 0 {
                patterns.extend(separated(arch, &["_", "-", "."]));
            }
        }
        patterns.extend(separated(os, &["_", "-", "."]));
    }

    // An empty version adds nothing, bare "_" and "-" patterns would strip every separator
    if !version.is_empty() {
        let version = version.to_lowercase();
        let bare = version.strip_prefix('v').unwrap_or(&version);
        for sep in ["_", "-"] {
            patterns.push(format!("{sep}{version}"));
            patterns.push(format!("{sep}{bare}"));
        }
    }

    remove_all(&name, &patterns)
}

fn lower(items: Vec<String>) -> Vec<String> {
    items.into_iter().map(|s| s.to_lowercase()).collect()
}

fn separated(token: &str, separators: &[&str]) -> Vec<String> {
    separators.iter().map(|sep| format!("{sep}{token}")).collect()
}

/// Remove every occurrence of `patterns` in a single left-to-right pass
///
/// At each position the first pattern (in slice order) that matches wins and the
/// scan resumes after it, so longer patterns must come before their prefixes.
fn remove_all(input: &str, patterns: &[String]) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        if let Some(p) = patterns
            .iter()
            .find(|p| !p.is_empty() && rest.starts_with(p.as_str()))
        {
            rest = &rest[p.len()..];
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }

    out
}
