//! `function:attach-action`: pick a function directory and attach the
//! originating plugin's action template to it.
//!
//! The run is a linear state machine:
//!
//! `SelectPlugin → SelectInstance → SelectFunction → Validate → Normalize →
//! Rename → Materialize → Done`
//!
//! Any pick answered with `None` ends the run as [`Outcome::Cancelled`]
//! before anything on disk changes. Missing folders/files end it as
//! [`Outcome::Aborted`]. Collisions and I/O failures are errors. Steps that
//! already completed are not rolled back: a rename stays in place if the
//! copy after it fails.

use super::{Abort, CancelPoint, Outcome};
use crate::action;
use crate::error::Result;
use crate::fs::Filesystem;
use crate::names;
use crate::paths;
use crate::prompt::{Choice, Prompter};
use crate::registry::{Instance, Registry, ServiceInstance};
use std::path::{Path, PathBuf};

/// Everything a run reads besides the disk and the user.
pub struct AttachContext<'a> {
    pub root: &'a Path,
    /// Service plugin identifiers offered in the first pick.
    pub services: &'a [String],
    pub registry: &'a Registry,
}

/// What a completed run did.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachReport {
    pub instance: String,
    pub original_name: String,
    pub canonical_name: String,
    pub function_dir: PathBuf,
    pub descriptor: PathBuf,
}

impl AttachReport {
    pub fn renamed(&self) -> bool {
        self.original_name != self.canonical_name
    }
}

enum State<'r> {
    SelectPlugin,
    SelectInstance {
        plugin: String,
    },
    SelectFunction {
        instance: &'r ServiceInstance,
    },
    Validate {
        instance: &'r ServiceInstance,
        functions_dir: PathBuf,
        raw_name: String,
    },
    Normalize {
        instance: &'r ServiceInstance,
        functions_dir: PathBuf,
        raw_name: String,
    },
    Rename {
        instance: &'r ServiceInstance,
        functions_dir: PathBuf,
        raw_name: String,
        canonical: String,
    },
    Materialize {
        instance: &'r ServiceInstance,
        function_dir: PathBuf,
        raw_name: String,
        canonical: String,
    },
}

enum Step<'r> {
    Next(State<'r>),
    Done(Outcome<AttachReport>),
}

pub fn attach_action(
    ctx: &AttachContext<'_>,
    fs: &dyn Filesystem,
    prompter: &mut dyn Prompter,
) -> Result<Outcome<AttachReport>> {
    let mut state = State::SelectPlugin;
    loop {
        let step = match state {
            State::SelectPlugin => select_plugin(ctx, prompter)?,
            State::SelectInstance { plugin } => select_instance(ctx, prompter, &plugin)?,
            State::SelectFunction { instance } => select_function(ctx, fs, prompter, instance)?,
            State::Validate {
                instance,
                functions_dir,
                raw_name,
            } => validate(ctx, fs, instance, functions_dir, raw_name),
            State::Normalize {
                instance,
                functions_dir,
                raw_name,
            } => {
                let canonical = names::canonicalize(&raw_name);
                tracing::debug!(
                    raw = %raw_name,
                    canonical = %canonical,
                    "normalized function name"
                );
                Step::Next(State::Rename {
                    instance,
                    functions_dir,
                    raw_name,
                    canonical,
                })
            }
            State::Rename {
                instance,
                functions_dir,
                raw_name,
                canonical,
            } => {
                let function_dir =
                    action::rename_if_changed(fs, &functions_dir, &raw_name, &canonical)?;
                if !action::require_exists(fs, &paths::handler_path(&function_dir)) {
                    Step::Done(Outcome::Aborted(Abort::MissingHandler {
                        function_dir: paths::display_relative(ctx.root, &function_dir),
                    }))
                } else {
                    Step::Next(State::Materialize {
                        instance,
                        function_dir,
                        raw_name,
                        canonical,
                    })
                }
            }
            State::Materialize {
                instance,
                function_dir,
                raw_name,
                canonical,
            } => {
                let descriptor = action::attach_template(
                    fs,
                    instance.action_template_path(),
                    &function_dir,
                    &canonical,
                )?;
                Step::Done(Outcome::Completed(AttachReport {
                    instance: instance.name().to_string(),
                    original_name: raw_name,
                    canonical_name: canonical,
                    function_dir,
                    descriptor,
                }))
            }
        };
        match step {
            Step::Next(next) => state = next,
            Step::Done(outcome) => {
                tracing::debug!(?outcome, "attach-action finished");
                return Ok(outcome);
            }
        }
    }
}

fn select_plugin<'r>(ctx: &AttachContext<'r>, prompter: &mut dyn Prompter) -> Result<Step<'r>> {
    let choices: Vec<Choice> = ctx
        .services
        .iter()
        .map(|s| Choice::new(s).with_description("Select a language for your service"))
        .collect();
    let Some(idx) = prompter.select("Select a service plugin", &choices)? else {
        return Ok(Step::Done(Outcome::Cancelled(CancelPoint::Plugin)));
    };
    let plugin = ctx.services[idx].clone();
    tracing::debug!(%plugin, "selected service plugin");
    Ok(Step::Next(State::SelectInstance { plugin }))
}

/// The plugin only gates whether to continue; the instances offered are the
/// project-wide list, not the plugin's own.
fn select_instance<'r>(
    ctx: &AttachContext<'r>,
    prompter: &mut dyn Prompter,
    plugin: &str,
) -> Result<Step<'r>> {
    let has_instances = ctx
        .registry
        .plugin_by_name(plugin)
        .is_some_and(|p| !p.instances().is_empty());
    if !has_instances {
        return Ok(Step::Done(Outcome::Aborted(Abort::NoInstances {
            plugin: plugin.to_string(),
        })));
    }

    let instances = ctx.registry.instances();
    let choices: Vec<Choice> = instances
        .iter()
        .map(|i| Choice::new(i.name()).with_description(format!("Select {} instance", i.name())))
        .collect();
    let Some(idx) = prompter.select("Select an instance", &choices)? else {
        return Ok(Step::Done(Outcome::Cancelled(CancelPoint::Instance)));
    };
    let instance = &instances[idx];
    if instance.plugin_name() != plugin {
        tracing::debug!(
            instance = instance.name(),
            instance_plugin = instance.plugin_name(),
            selected_plugin = plugin,
            "instance belongs to a different plugin than the one selected"
        );
    }
    Ok(Step::Next(State::SelectFunction { instance }))
}

fn select_function<'r>(
    ctx: &AttachContext<'r>,
    fs: &dyn Filesystem,
    prompter: &mut dyn Prompter,
    instance: &'r ServiceInstance,
) -> Result<Step<'r>> {
    let functions_dir = paths::functions_dir(ctx.root, instance.installation_path());
    let no_functions = || {
        Step::Done(Outcome::Aborted(Abort::NoFunctions {
            functions_dir: paths::display_relative(ctx.root, &functions_dir),
        }))
    };
    if !action::require_exists(fs, &functions_dir) {
        return Ok(no_functions());
    }
    let directories = fs.list_directories(&functions_dir)?;
    if directories.is_empty() {
        return Ok(no_functions());
    }

    let choices: Vec<Choice> = directories.iter().map(Choice::new).collect();
    let Some(idx) = prompter.select("Select a function", &choices)? else {
        return Ok(Step::Done(Outcome::Cancelled(CancelPoint::Function)));
    };
    let raw_name = directories[idx].clone();
    tracing::debug!(function = %raw_name, "selected function");
    Ok(Step::Next(State::Validate {
        instance,
        functions_dir,
        raw_name,
    }))
}

fn validate<'r>(
    ctx: &AttachContext<'r>,
    fs: &dyn Filesystem,
    instance: &'r ServiceInstance,
    functions_dir: PathBuf,
    raw_name: String,
) -> Step<'r> {
    if !action::require_exists(fs, &paths::function_dir(&functions_dir, &raw_name)) {
        return Step::Done(Outcome::Aborted(Abort::MissingFunction {
            name: raw_name,
            functions_dir: paths::display_relative(ctx.root, &functions_dir),
        }));
    }
    if !action::require_exists(fs, instance.action_template_path()) {
        return Step::Done(Outcome::Aborted(Abort::MissingTemplate {
            plugin: instance.plugin_name().to_string(),
            template: paths::display_relative(ctx.root, instance.action_template_path()),
        }));
    }
    Step::Next(State::Normalize {
        instance,
        functions_dir,
        raw_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, InstanceConfig, PluginConfig};
    use crate::error::FnkitError;
    use crate::fs::spy::{Mutation, RecordingFilesystem};
    use crate::prompt::scripted::ScriptedPrompter;
    use tempfile::TempDir;

    const DESCRIPTOR: &str = "type Mutation {\n  actionName(input: ActionInput): ActionOutput\n}\n";

    struct Project {
        dir: TempDir,
        config: Config,
    }

    impl Project {
        /// Plugins `node` and `go`; instances `api` (node) and `jobs` (go).
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let mut config = Config::new("demo");
            config.services = vec!["node".into(), "go".into(), "python".into()];
            for plugin in ["node", "go"] {
                let template = dir.path().join("templates").join(plugin);
                std::fs::create_dir_all(template.join("resolvers")).unwrap();
                std::fs::write(template.join("action.graphql"), DESCRIPTOR).unwrap();
                std::fs::write(template.join("resolvers/index.js"), plugin).unwrap();
                config.plugins.insert(
                    plugin.into(),
                    PluginConfig {
                        action_template: PathBuf::from(format!("templates/{plugin}")),
                    },
                );
            }
            for (name, plugin) in [("api", "node"), ("jobs", "go")] {
                config.instances.push(InstanceConfig {
                    name: name.into(),
                    plugin: plugin.into(),
                    installation_path: PathBuf::from(format!("backend/{name}")),
                });
            }
            Self { dir, config }
        }

        fn root(&self) -> &Path {
            self.dir.path()
        }

        fn functions(&self, instance: &str) -> PathBuf {
            self.root().join("backend").join(instance).join("functions")
        }

        fn add_function(&self, instance: &str, name: &str, with_handler: bool) {
            let dir = self.functions(instance).join(name);
            std::fs::create_dir_all(&dir).unwrap();
            if with_handler {
                std::fs::write(dir.join("handler.js"), "module.exports = () => {};\n").unwrap();
            }
        }

        fn run(
            &self,
            fs: &dyn Filesystem,
            prompter: &mut ScriptedPrompter,
        ) -> Result<Outcome<AttachReport>> {
            let registry = Registry::from_config(self.root(), &self.config).unwrap();
            let ctx = AttachContext {
                root: self.root(),
                services: &self.config.services,
                registry: &registry,
            };
            attach_action(&ctx, fs, prompter)
        }
    }

    #[test]
    fn hyphenated_function_is_renamed_and_attached() {
        let project = Project::new();
        project.add_function("api", "send-email", true);
        let fs = RecordingFilesystem::default();
        let mut prompter = ScriptedPrompter::new([Some("node"), Some("api"), Some("send-email")]);

        let outcome = project.run(&fs, &mut prompter).unwrap();
        let Outcome::Completed(report) = outcome else {
            panic!("expected completion");
        };
        assert!(report.renamed());
        assert_eq!(report.canonical_name, "send_email");

        let functions = project.functions("api");
        let dir = functions.join("send_email");
        assert!(!functions.join("send-email").exists());
        assert_eq!(report.function_dir, dir);
        assert!(dir.join("handler.js").exists());
        assert_eq!(
            std::fs::read_to_string(dir.join("resolvers/index.js")).unwrap(),
            "node"
        );
        assert_eq!(
            std::fs::read_to_string(dir.join("action.graphql")).unwrap(),
            DESCRIPTOR.replace("actionName", "send_email")
        );
        assert_eq!(fs.mutations().len(), 3);
    }

    #[test]
    fn canonical_function_is_not_renamed() {
        let project = Project::new();
        project.add_function("api", "ping", true);
        let fs = RecordingFilesystem::default();
        let mut prompter = ScriptedPrompter::new([Some("node"), Some("api"), Some("ping")]);

        let outcome = project.run(&fs, &mut prompter).unwrap();
        assert!(matches!(outcome, Outcome::Completed(ref r) if !r.renamed()));
        assert!(!fs
            .mutations()
            .iter()
            .any(|m| matches!(m, Mutation::Rename(..))));
    }

    #[test]
    fn cancel_at_each_pick_touches_nothing() {
        let picks = ["node", "api", "send-email"];
        let points = [CancelPoint::Plugin, CancelPoint::Instance, CancelPoint::Function];
        for k in 0..3 {
            let project = Project::new();
            project.add_function("api", "send-email", true);
            let fs = RecordingFilesystem::default();
            let answers: Vec<Option<&str>> = (0..=k)
                .map(|i| if i == k { None } else { Some(picks[i]) })
                .collect();
            let mut prompter = ScriptedPrompter::new(answers);

            let outcome = project.run(&fs, &mut prompter).unwrap();
            assert_eq!(outcome, Outcome::Cancelled(points[k]));
            assert!(fs.mutations().is_empty(), "mutated after cancel at pick {k}");
            assert!(project.functions("api").join("send-email").exists());
        }
    }

    #[test]
    fn plugin_without_instances_aborts() {
        let project = Project::new();
        let fs = RecordingFilesystem::default();
        let mut prompter = ScriptedPrompter::new([Some("python")]);

        let outcome = project.run(&fs, &mut prompter).unwrap();
        assert_eq!(
            outcome,
            Outcome::Aborted(Abort::NoInstances {
                plugin: "python".into()
            })
        );
        assert_eq!(prompter.asked.len(), 1);
    }

    #[test]
    fn instance_pick_offers_every_instance() {
        let project = Project::new();
        project.add_function("jobs", "nightly", true);
        let fs = RecordingFilesystem::default();
        let mut prompter = ScriptedPrompter::new([Some("node"), Some("jobs"), Some("nightly")]);

        let outcome = project.run(&fs, &mut prompter).unwrap();
        assert_eq!(prompter.asked[1].1, vec!["api", "jobs"]);

        // The chosen instance's own plugin supplies the template.
        let Outcome::Completed(report) = outcome else {
            panic!("expected completion");
        };
        assert_eq!(
            std::fs::read_to_string(report.function_dir.join("resolvers/index.js")).unwrap(),
            "go"
        );
    }

    #[test]
    fn missing_functions_folder_aborts() {
        let project = Project::new();
        let fs = RecordingFilesystem::default();
        let mut prompter = ScriptedPrompter::new([Some("node"), Some("api")]);

        let outcome = project.run(&fs, &mut prompter).unwrap();
        assert_eq!(
            outcome,
            Outcome::Aborted(Abort::NoFunctions {
                functions_dir: "backend/api/functions".into()
            })
        );
    }

    #[test]
    fn empty_functions_folder_aborts_without_mutation() {
        let project = Project::new();
        std::fs::create_dir_all(project.functions("api")).unwrap();
        std::fs::write(project.functions("api").join("stray.js"), "").unwrap();
        let fs = RecordingFilesystem::default();
        let mut prompter = ScriptedPrompter::new([Some("node"), Some("api")]);

        let outcome = project.run(&fs, &mut prompter).unwrap();
        let Outcome::Aborted(abort) = outcome else {
            panic!("expected abort");
        };
        assert_eq!(
            abort.to_string(),
            "No functions found in backend/api/functions. Please add one and try again!"
        );
        assert!(fs.mutations().is_empty());
    }

    #[test]
    fn missing_handler_aborts_before_copy() {
        let project = Project::new();
        project.add_function("api", "send-email", false);
        let fs = RecordingFilesystem::default();
        let mut prompter = ScriptedPrompter::new([Some("node"), Some("api"), Some("send-email")]);

        let outcome = project.run(&fs, &mut prompter).unwrap();
        let Outcome::Aborted(abort) = outcome else {
            panic!("expected abort");
        };
        assert_eq!(
            abort.to_string(),
            "Missing \"handler.js\" file in \"backend/api/functions/send_email\". \
             Please add one and try again!"
        );
        assert!(!fs
            .mutations()
            .iter()
            .any(|m| matches!(m, Mutation::CopyDir(..) | Mutation::ReplaceToken(_))));
        assert!(!project
            .functions("api")
            .join("send_email/action.graphql")
            .exists());
    }

    #[test]
    fn collision_stops_before_copy() {
        let project = Project::new();
        project.add_function("api", "send-email", true);
        project.add_function("api", "send_email", true);
        let fs = RecordingFilesystem::default();
        let mut prompter = ScriptedPrompter::new([Some("node"), Some("api"), Some("send-email")]);

        let err = project.run(&fs, &mut prompter).unwrap_err();
        assert!(matches!(err, FnkitError::NameCollision { .. }));
        assert!(fs.mutations().is_empty());
        assert!(!project
            .functions("api")
            .join("send_email/action.graphql")
            .exists());
    }

    #[test]
    fn missing_template_aborts_before_rename() {
        let mut project = Project::new();
        project.add_function("api", "send-email", true);
        project.config.plugins.get_mut("node").unwrap().action_template =
            PathBuf::from("templates/gone");
        let fs = RecordingFilesystem::default();
        let mut prompter = ScriptedPrompter::new([Some("node"), Some("api"), Some("send-email")]);

        let outcome = project.run(&fs, &mut prompter).unwrap();
        assert!(matches!(outcome, Outcome::Aborted(Abort::MissingTemplate { .. })));
        assert!(fs.mutations().is_empty());
    }
}
