//! Step: install Homebrew formulae and casks.
use anyhow::Result;

use super::{Context, Task, TaskResult, process_resource_states, task_deps};
use crate::resources::homebrew::locate_brew;
use crate::resources::package::{BrewKind, BrewPackageResource, installed_packages};

/// Install every configured formula and cask that is not yet installed.
///
/// Installed packages are queried once per kind rather than per package.
#[derive(Debug)]
pub struct InstallBrewPackages;

impl Task for InstallBrewPackages {
    fn name(&self) -> &'static str {
        "Install Homebrew packages"
    }

    task_deps![super::homebrew::InstallHomebrew];

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.platform.supports_homebrew()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let brew_settings = &ctx.config.brew;
        if brew_settings.is_empty() {
            return Ok(TaskResult::Skipped("no packages configured".to_string()));
        }
        let Some(brew) = locate_brew(&*ctx.executor) else {
            return Ok(TaskResult::Skipped("brew not found".to_string()));
        };
        let brew = brew.to_string_lossy().to_string();

        let mut resource_states = Vec::new();
        for (kind, names) in [
            (BrewKind::Formula, &brew_settings.formulae),
            (BrewKind::Cask, &brew_settings.casks),
        ] {
            if names.is_empty() {
                continue;
            }
            let installed = installed_packages(&brew, kind, &*ctx.executor)?;
            ctx.log
                .debug(&format!("{} {kind} package(s) installed", installed.len()));
            for name in names {
                let resource =
                    BrewPackageResource::new(name.clone(), kind, brew.clone(), &*ctx.executor);
                let state = resource.state_from_installed(&installed);
                resource_states.push((resource, state));
            }
        }

        process_resource_states(ctx, resource_states, "install")
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::platform::Os;
    use crate::resources::test_helpers::MockExecutor;
    use crate::tasks::test_helpers::{empty_config, make_context_with};
    use std::path::PathBuf;
    use std::sync::Arc;

    #[test]
    fn installs_only_missing_packages() {
        let mut config = empty_config(PathBuf::from("/repo"));
        config.brew.formulae = vec!["git".to_string(), "tmux".to_string()];
        config.brew.casks = vec!["wezterm".to_string()];
        let executor = Arc::new(
            MockExecutor::with_responses(vec![
                (true, "git\n".to_string()),
                (true, "wezterm\n".to_string()),
            ])
            .with_programs(&["brew"]),
        );
        let (ctx, _log) = make_context_with(config, Os::MacOs, executor.clone());

        assert_eq!(InstallBrewPackages.run(&ctx).unwrap(), TaskResult::Ok);
        assert_eq!(
            executor.calls(),
            vec![
                "brew list --formula -1",
                "brew list --cask -1",
                "brew install tmux",
            ]
        );
    }

    #[test]
    fn not_applicable_without_homebrew_support() {
        let mut config = empty_config(PathBuf::from("/repo"));
        config.brew.formulae = vec!["git".to_string()];
        let (ctx, _log) = make_context_with(config, Os::Other, Arc::new(MockExecutor::default()));
        assert!(!InstallBrewPackages.should_run(&ctx));
    }

    #[test]
    fn dry_run_installs_nothing() {
        let mut config = empty_config(PathBuf::from("/repo"));
        config.brew.formulae = vec!["ripgrep".to_string()];
        let executor = Arc::new(
            MockExecutor::with_responses(vec![(true, String::new())]).with_programs(&["brew"]),
        );
        let (mut ctx, _log) = make_context_with(config, Os::MacOs, executor.clone());
        ctx.dry_run = true;
        assert_eq!(InstallBrewPackages.run(&ctx).unwrap(), TaskResult::DryRun);
        assert_eq!(executor.calls(), vec!["brew list --formula -1"]);
    }
}
