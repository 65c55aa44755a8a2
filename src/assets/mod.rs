pub mod extension;
pub mod peel;
pub mod sanitize;

pub use extension::is_supported_extension;
pub use sanitize::sanitize_name;

use crate::download::http;
use crate::error::ResolveError;
use crate::models::{Asset, FilterOptions, FilteredAsset, FinalFile};
use crate::platform::{PlatformDescriptor, RuntimePlatform};
use crate::select::{PromptSelector, Selector};
use crate::utils::get_filename_from_url;
use log::debug;

const CONTEXT_SCORE: i32 = 1;
const OS_SCORE: i32 = 10;
const ARCH_SCORE: i32 = 5;
const OS_EXTENSION_SCORE: i32 = 15;

/// Picks the right release file for a platform and unwraps it
pub struct Filter {
    opts: FilterOptions,
    platform: Box<dyn PlatformDescriptor>,
    selector: Box<dyn Selector>,
    user_agent: Option<String>,
}

impl Filter {
    pub fn new(
        opts: FilterOptions,
        platform: Box<dyn PlatformDescriptor>,
        selector: Box<dyn Selector>,
    ) -> Self {
        Self {
            opts,
            platform,
            selector,
            user_agent: None,
        }
    }

    /// Filter for the running platform, prompting on the terminal
    pub fn for_runtime(opts: FilterOptions) -> Self {
        Self::new(
            opts,
            Box::new(RuntimePlatform),
            Box::new(PromptSelector::stdio()),
        )
    }

    /// User-Agent sent with downloads
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn options(&self) -> &FilterOptions {
        &self.opts
    }

    pub fn platform(&self) -> &dyn PlatformDescriptor {
        self.platform.as_ref()
    }

    pub fn selector(&mut self) -> &mut dyn Selector {
        self.selector.as_mut()
    }

    /// Strip platform and version decoration using this filter's platform
    pub fn sanitize_name(&self, name: &str, version: &str) -> String {
        sanitize_name(self.platform.as_ref(), name, version)
    }

    /// Select the asset best matching the platform, asking the user when
    /// several candidates are equally good
    pub fn filter_assets(
        &mut self,
        context_name: &str,
        assets: &[Asset],
    ) -> Result<FilteredAsset, ResolveError> {
        let mut matches = if let [asset] = assets {
            vec![unscored(context_name, asset)]
        } else if self.opts.skip_scoring {
            debug!("--all flag was supplied, skipping scoring");
            assets.iter().map(|a| unscored(context_name, a)).collect()
        } else {
            let table = self.score_table(context_name);
            let scored: Vec<FilteredAsset> = assets
                .iter()
                .filter_map(|a| score_asset(&table, context_name, a))
                .collect();
            keep_highest(scored)
        };

        match matches.len() {
            0 => Err(ResolveError::NoCompatibleFiles),
            1 => Ok(matches.remove(0)),
            _ => {
                matches.sort_by_key(|m| m.to_string());
                let labels: Vec<String> = matches.iter().map(|m| m.to_string()).collect();
                let choice = self
                    .selector
                    .select("Multiple matches found, please select one:", &labels)?;
                Ok(matches.swap_remove(choice))
            }
        }
    }

    /// Lower-cased key -> weight; later categories overwrite earlier ones on collision
    fn score_table(&self, context_name: &str) -> Vec<(String, i32)> {
        let mut table: Vec<(String, i32)> = Vec::new();
        let mut insert = |key: &str, score: i32| {
            let key = key.to_lowercase();
            match table.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = score,
                None => table.push((key, score)),
            }
        };

        insert(context_name, CONTEXT_SCORE);
        for os in self.platform.operating_system_names() {
            insert(&os, OS_SCORE);
        }
        for arch in self.platform.architecture_names() {
            insert(&arch, ARCH_SCORE);
        }
        for ext in self.platform.os_specific_extensions() {
            insert(&ext, OS_EXTENSION_SCORE);
        }
        table
    }

    /// Download the selected asset and unwrap it down to a single file
    pub fn process_url(&mut self, asset: &FilteredAsset) -> Result<FinalFile, ResolveError> {
        let bytes = http::fetch_bytes(&asset.url, &asset.extra_headers, self.user_agent.as_deref())?;
        self.process_bytes(&asset.context_name, &asset.name, bytes)
    }
}

fn unscored(context_name: &str, asset: &Asset) -> FilteredAsset {
    FilteredAsset {
        context_name: context_name.to_string(),
        name: asset.name.clone(),
        display_name: asset.display_name.clone(),
        url: asset.url.clone(),
        score: 0,
        ..Default::default()
    }
}

/// Score both the asset name and its URL basename, keeping the better one as the name
fn score_asset(table: &[(String, i32)], context_name: &str, asset: &Asset) -> Option<FilteredAsset> {
    let url_name = if asset.url.is_empty() {
        None
    } else {
        Some(get_filename_from_url(&asset.url))
    };

    let mut best: Option<(i32, &str)> = None;
    for candidate in std::iter::once(asset.name.as_str()).chain(url_name.as_deref()) {
        let score = score_name(table, candidate);
        if score > best.map_or(0, |(s, _)| s) {
            best = Some((score, candidate));
        }
    }

    let (score, name) = best?;
    Some(FilteredAsset {
        name: name.to_string(),
        score,
        ..unscored(context_name, asset)
    })
}

fn score_name(table: &[(String, i32)], name: &str) -> i32 {
    if !is_supported_extension(name) {
        return 0;
    }

    let lower = name.to_lowercase();
    table
        .iter()
        .filter(|(key, _)| !key.is_empty() && lower.contains(key.as_str()))
        .map(|(_, score)| score)
        .sum()
}

fn keep_highest(matches: Vec<FilteredAsset>) -> Vec<FilteredAsset> {
    let highest = matches.iter().map(|m| m.score).max().unwrap_or(0);
    matches
        .into_iter()
        .filter(|m| {
            if m.score < highest {
                debug!(
                    "Removing {} (URL {}) with score {} lower than {}",
                    m.name, m.url, m.score, highest
                );
                false
            } else {
                debug!(
                    "Keeping {} (URL {}) with highest score {}",
                    m.name, m.url, m.score
                );
                true
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::StaticPlatform;
    use crate::select::FixedSelector;

    fn linux() -> StaticPlatform {
        StaticPlatform::new(&["linux"], &["amd64", "x86_64", "x64", "64"], &["AppImage"])
    }

    fn windows() -> StaticPlatform {
        StaticPlatform::new(
            &["windows", "win"],
            &["amd64", "x86_64", "x64", "64"],
            &["exe"],
        )
    }

    fn filter(platform: StaticPlatform) -> Filter {
        Filter::new(
            FilterOptions::default(),
            Box::new(platform),
            Box::new(FixedSelector::exhausted()),
        )
    }

    fn release(base: &str, names: &[&str]) -> Vec<Asset> {
        names
            .iter()
            .map(|n| Asset::new(*n, format!("{base}/{n}")))
            .collect()
    }

    const BIN: &str = "https://github.com/marcosnils/bin/releases/download/v0.0.1";

    #[test]
    fn test_filter_assets_linux() {
        let cases: Vec<(&str, Vec<Asset>, &str)> = vec![
            (
                "bin",
                release(
                    BIN,
                    &[
                        "bin_0.0.1_Linux_x86_64",
                        "bin_0.0.1_Linux_i386",
                        "bin_0.0.1_Darwin_x86_64",
                    ],
                ),
                "bin_0.0.1_Linux_x86_64",
            ),
            (
                "bin",
                release(
                    BIN,
                    &[
                        "bin_0.1.0_Windows_i386.exe",
                        "bin_0.1.0_Linux_x86_64",
                        "bin_0.1.0_Darwin_x86_64",
                    ],
                ),
                "bin_0.1.0_Linux_x86_64",
            ),
            (
                "yq",
                release(
                    "https://github.com/mikefarah/yq/releases/download/3.3.2",
                    &["yq_freebsd_amd64", "yq_linux_amd64", "yq_windows_amd64.exe"],
                ),
                "yq_linux_amd64",
            ),
            (
                "jq",
                release(
                    "https://github.com/stedolan/jq/releases/download/jq-1.6",
                    &["jq-win64.exe", "jq-linux64", "jq-osx-amd64"],
                ),
                "jq-linux64",
            ),
            (
                "tezos",
                release(
                    "https://gitlab.com/api/v4/projects/3836952/packages/generic/tezos/8.2.0",
                    &["x86_64-linux-tezos-binaries.tar.gz"],
                ),
                "x86_64-linux-tezos-binaries.tar.gz",
            ),
            (
                "launchpad",
                release(
                    "https://github.com/Mirantis/launchpad/releases/download/1.2.0-rc.1",
                    &["launchpad-linux-x64", "launchpad-win-x64.exe"],
                ),
                "launchpad-linux-x64",
            ),
            (
                "usql",
                release(
                    "https://github.com/xo/usql/releases/download/v0.8.2",
                    &[
                        "usql-0.8.2-darwin-amd64.tar.bz2",
                        "usql-0.8.2-linux-amd64.tar.bz2",
                        "usql-0.8.2-windows-amd64.zip",
                    ],
                ),
                "usql-0.8.2-linux-amd64.tar.bz2",
            ),
            ("cli", vec![Asset::new("dapr", "")], "dapr"),
        ];

        for (context, assets, expected) in cases {
            let picked = filter(linux()).filter_assets(context, &assets).unwrap();
            assert_eq!(picked.name, expected, "{context}");
        }
    }

    #[test]
    fn test_filter_assets_windows() {
        let cases: Vec<(&str, Vec<Asset>, &str)> = vec![
            (
                "bin",
                release(
                    BIN,
                    &[
                        "bin_0.0.1_Windows_x86_64.exe",
                        "bin_0.1.0_Linux_x86_64",
                        "bin_0.1.0_Darwin_x86_64",
                    ],
                ),
                "bin_0.0.1_Windows_x86_64.exe",
            ),
            (
                "launchpad",
                release(
                    "https://github.com/Mirantis/launchpad/releases/download/1.2.0-rc.1",
                    &["launchpad-linux-x64", "launchpad-win-x64.exe"],
                ),
                "launchpad-win-x64.exe",
            ),
            (
                "usql",
                release(
                    "https://github.com/xo/usql/releases/download/v0.8.2",
                    &[
                        "usql-0.8.2-darwin-amd64.tar.bz2",
                        "usql-0.8.2-linux-amd64.tar.bz2",
                        "usql-0.8.2-windows-amd64.zip",
                    ],
                ),
                "usql-0.8.2-windows-amd64.zip",
            ),
        ];

        for (context, assets, expected) in cases {
            let picked = filter(windows()).filter_assets(context, &assets).unwrap();
            assert_eq!(picked.name, expected, "{context}");
        }
    }

    #[test]
    fn test_os_specific_extension_wins() {
        let cura = release(
            "https://github.com/Ultimaker/Cura/releases/download/4.7.1",
            &[
                "Ultimaker_Cura-4.7.1-Darwin.dmg",
                "Ultimaker_Cura-4.7.1-win64.exe",
                "Ultimaker_Cura-4.7.1-win64.msi",
                "Ultimaker_Cura-4.7.1.AppImage",
                "Ultimaker_Cura-4.7.1.AppImage.asc",
            ],
        );

        let picked = filter(linux()).filter_assets("Cura", &cura).unwrap();
        assert_eq!(picked.name, "Ultimaker_Cura-4.7.1.AppImage");

        let picked = filter(windows()).filter_assets("Cura", &cura).unwrap();
        assert_eq!(picked.name, "Ultimaker_Cura-4.7.1-win64.exe");
    }

    #[test]
    fn test_url_basename_replaces_label() {
        let base = "https://gitlab-runner-downloads.s3.amazonaws.com/v13.2.1/binaries";
        let assets = vec![
            Asset::new("Windows 64 bits", format!("{base}/gitlab-runner-windows-amd64.zip")),
            Asset::new("linux amd64", format!("{base}/gitlab-runner-linux-amd64")),
            Asset::new("macOS", format!("{base}/gitlab-runner-darwin-amd64")),
        ];

        let picked = filter(linux())
            .filter_assets("gitlab-runner", &assets)
            .unwrap();
        assert_eq!(picked.name, "gitlab-runner-linux-amd64");
        assert_eq!(picked.url, format!("{base}/gitlab-runner-linux-amd64"));
    }

    #[test]
    fn test_selection_is_deterministic() {
        let assets = release(
            BIN,
            &[
                "bin_0.0.1_Linux_x86_64",
                "bin_0.0.1_Linux_i386",
                "bin_0.0.1_Darwin_x86_64",
            ],
        );
        let mut f = filter(linux());
        let first = f.filter_assets("bin", &assets).unwrap();
        let second = f.filter_assets("bin", &assets).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.score, 1 + OS_SCORE + ARCH_SCORE * 2);
    }

    #[test]
    fn test_ties_are_offered_sorted() {
        let assets = release(
            BIN,
            &["tool-linux-amd64-musl", "tool-linux-amd64-gnu", "tool-darwin-amd64"],
        );
        let selector = FixedSelector::index(1);
        let prompts = selector.prompts();
        let mut f = Filter::new(
            FilterOptions::default(),
            Box::new(linux()),
            Box::new(selector),
        );

        let picked = f.filter_assets("tool", &assets).unwrap();
        assert_eq!(picked.name, "tool-linux-amd64-musl");

        let prompts = prompts.borrow();
        assert_eq!(prompts.len(), 1);
        assert_eq!(
            prompts[0].options,
            vec!["tool-linux-amd64-gnu", "tool-linux-amd64-musl"]
        );
    }

    #[test]
    fn test_ties_sort_by_display_name() {
        let mut assets = release(BIN, &["tool-linux-amd64-a", "tool-linux-amd64-b"]);
        assets[0].display_name = Some("Zeta build".to_string());
        assets[1].display_name = Some("Alpha build".to_string());
        let selector = FixedSelector::index(0);
        let prompts = selector.prompts();
        let mut f = Filter::new(
            FilterOptions::default(),
            Box::new(linux()),
            Box::new(selector),
        );

        let picked = f.filter_assets("tool", &assets).unwrap();
        assert_eq!(picked.name, "tool-linux-amd64-b");
        assert_eq!(prompts.borrow()[0].options, vec!["Alpha build", "Zeta build"]);
    }

    #[test]
    fn test_skip_scoring_offers_everything() {
        let assets = release(
            BIN,
            &[
                "bin_0.0.1_Linux_x86_64",
                "bin_0.0.1_Linux_i386",
                "bin_0.0.1_Darwin_x86_64",
            ],
        );
        let selector = FixedSelector::index(0);
        let prompts = selector.prompts();
        let mut f = Filter::new(
            FilterOptions {
                skip_scoring: true,
                ..Default::default()
            },
            Box::new(linux()),
            Box::new(selector),
        );

        let picked = f.filter_assets("bin", &assets).unwrap();
        assert_eq!(picked.name, "bin_0.0.1_Darwin_x86_64");
        assert_eq!(picked.score, 0);
        assert_eq!(prompts.borrow()[0].options.len(), 3);
    }

    #[test]
    fn test_no_compatible_files() {
        let assets = release(BIN, &["checksums.txt.asc", "tool_1.0_amd64.deb"]);
        let err = filter(linux()).filter_assets("other", &assets).unwrap_err();
        assert!(matches!(err, ResolveError::NoCompatibleFiles));
        assert_eq!(err.to_string(), "could not find any compatible files");
    }

    #[test]
    fn test_selector_failure_propagates() {
        let assets = release(BIN, &["tool-linux-amd64-a", "tool-linux-amd64-b"]);
        let err = filter(linux()).filter_assets("tool", &assets).unwrap_err();
        assert!(matches!(err, ResolveError::Select(_)));
    }

    #[test]
    fn test_score_table_later_categories_overwrite() {
        let platform = StaticPlatform::new(&["windows", "win"], &["amd64"], &["exe", "Win"]);
        let table = filter(platform).score_table("Win");
        assert_eq!(
            table,
            vec![
                ("win".to_string(), OS_EXTENSION_SCORE),
                ("windows".to_string(), OS_SCORE),
                ("amd64".to_string(), ARCH_SCORE),
                ("exe".to_string(), OS_EXTENSION_SCORE),
            ]
        );
    }

    #[test]
    fn test_overlapping_keys_each_count() {
        let table = filter(linux()).score_table("");
        assert_eq!(score_name(&table, "tool_linux_x86_64"), OS_SCORE + ARCH_SCORE * 2);
    }
}
