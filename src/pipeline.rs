//! Build pipeline: scan, synthesize the index, bundle, copy.
//!
//! A project builds in one of two shapes. With `namespace` set it is a
//! single app rooted at `src/components/<namespace>/app/app.<ext>`; without
//! it every component and example is bundled into the playground.

use std::fs;
use std::path::{Path, PathBuf};

use crate::bundler::{BundlePlan, BundleReport, Bundler, EntryPoint, LoadHook};
use crate::config::CopyRule;
use crate::discovery::scan;
use crate::error::{ElementError, Result};
use crate::fsutil::{copy_file, copy_tree, file_exists, folder_exists};
use crate::output::{display_path, plural, Printer};
use crate::playground::{
    app_template, favicon, fill_slots, playground_template, synthesize, Mode, PlaygroundOptions, Render,
    Slot,
};
use crate::project::{Project, FAVICON_FILE, INDEX_FILE};
use crate::rewrite::HtmlDependencyRewriter;

/// Name of the generated playground entry module.
pub const PLAYGROUND_ENTRY: &str = "playground-entry";

/// Bundle file written into the output directory.
pub const BUNDLE_FILE: &str = "main.js";

/// Summary of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    pub out_dir: PathBuf,
    pub components: usize,
    pub examples: usize,
    pub report: BundleReport,
}

/// Drives one project through a bundler.
pub struct Pipeline<'a, B: Bundler + ?Sized> {
    project: &'a Project,
    bundler: &'a B,
    printer: Printer,
}

impl<'a, B: Bundler + ?Sized> Pipeline<'a, B> {
    pub fn new(project: &'a Project, bundler: &'a B, printer: Printer) -> Self {
        Self {
            project,
            bundler,
            printer,
        }
    }

    pub fn project(&self) -> &Project {
        self.project
    }

    /// `dist/` for development, `build/` for production.
    pub fn out_dir(&self, mode: Mode) -> PathBuf {
        match mode {
            Mode::Development => self.project.layout.dist_dir(),
            Mode::Production => self.project.layout.build_dir(),
        }
    }

    /// Full build followed by the `copy` rules.
    pub fn run(&self, mode: Mode) -> Result<BuildOutcome> {
        let outcome = self.rebuild(mode)?;
        let copied = apply_copy_rules(self.project, &outcome.out_dir)?;
        if copied > 0 {
            self.printer
                .info("Copied", &plural(copied, "file", "files"));
        }
        Ok(outcome)
    }

    /// Build without re-applying `copy` rules.
    pub fn rebuild(&self, mode: Mode) -> Result<BuildOutcome> {
        let out_dir = self.out_dir(mode);
        fs::create_dir_all(&out_dir).map_err(|e| ElementError::Io {
            path: out_dir.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;

        let result = match self.project.config.namespace.as_deref() {
            Some(namespace) => self.build_app(namespace, mode, out_dir),
            None => self.build_playground(mode, out_dir),
        };

        match &result {
            Ok(outcome) => {
                for warning in &outcome.report.warnings {
                    self.printer.warning("esbuild", warning);
                }
                self.printer.success("Finished", "Build succeeded!");
            }
            Err(ElementError::Bundler { .. }) => {
                self.printer.error("Failed", "Build ended with errors");
            }
            Err(_) => {}
        }
        result
    }

    fn build_playground(&self, mode: Mode, out_dir: PathBuf) -> Result<BuildOutcome> {
        let layout = &self.project.layout;
        self.printer.status("Building", "components");

        if !folder_exists(&layout.components_dir()) {
            return Err(ElementError::MissingComponentsDir);
        }

        let rewriter = HtmlDependencyRewriter::for_project(self.project);
        let scanned = scan(self.project)?;
        for missing in &scanned.missing_examples {
            self.printer
                .warning("Missing", &format!("example file {}", display_path(missing)));
        }
        tracing::debug!(
            "scanned {} components, {} examples",
            scanned.component_count(),
            scanned.example_count()
        );

        let options = PlaygroundOptions::from_config(&self.project.config, mode);
        let index = synthesize(
            &playground_template(layout)?,
            &scanned.namespaces,
            &self.project.config.navigation,
            &options,
        )?;
        let icon = favicon(layout)?;

        let entry = EntryPoint::Virtual {
            name: PLAYGROUND_ENTRY.to_string(),
            contents: scanned.entry_module(),
        };
        let report = self.bundle(entry, mode, &out_dir, &rewriter)?;

        write(&out_dir.join(INDEX_FILE), index.as_bytes())?;
        write(&out_dir.join(FAVICON_FILE), &icon)?;

        Ok(BuildOutcome {
            out_dir,
            components: scanned.component_count(),
            examples: scanned.example_count(),
            report,
        })
    }

    fn build_app(&self, namespace: &str, mode: Mode, out_dir: PathBuf) -> Result<BuildOutcome> {
        let layout = &self.project.layout;
        self.printer.status("Building", "app");

        let entry = layout
            .components_dir()
            .join(namespace)
            .join("app")
            .join(self.project.source_file("app"));
        if !file_exists(&entry) {
            return Err(ElementError::Build {
                message: format!("Missing app entry {}", display_path(&entry)),
                help: Some(format!(
                    "Create src/components/{}/app/{} or remove `namespace` to build the playground",
                    namespace,
                    self.project.source_file("app")
                )),
            });
        }

        let index_override = layout.src_dir().join(INDEX_FILE);
        let index = if file_exists(&index_override) {
            None
        } else {
            Some(app_index(&app_template()?, self.project.config.effective_title(), namespace))
        };
        let icon = favicon(layout)?;

        let rewriter = HtmlDependencyRewriter::for_project(self.project);
        let report = self.bundle(EntryPoint::File(entry), mode, &out_dir, &rewriter)?;

        match index {
            Some(index) => write(&out_dir.join(INDEX_FILE), index.as_bytes())?,
            None => copy_file(&index_override, &out_dir.join(INDEX_FILE))?,
        }
        write(&out_dir.join(FAVICON_FILE), &icon)?;

        Ok(BuildOutcome {
            out_dir,
            components: 0,
            examples: 0,
            report,
        })
    }

    fn bundle(
        &self,
        entry: EntryPoint,
        mode: Mode,
        out_dir: &Path,
        rewriter: &HtmlDependencyRewriter,
    ) -> Result<BundleReport> {
        let outfile = out_dir.join(BUNDLE_FILE);
        let plan = match mode {
            Mode::Development => BundlePlan::development(entry, outfile),
            Mode::Production => BundlePlan::production(entry, outfile),
        };
        let hooks: [&dyn LoadHook; 1] = [rewriter];
        self.bundler.bundle(&plan, &hooks)
    }
}

/// Default app page with the title and the `<namespace-app>` host filled in.
pub fn app_index(template: &str, title: &str, namespace: &str) -> String {
    let mut fills: Vec<(Slot, Render<'_>)> = Vec::new();
    fills.push((Slot::Title, Box::new(|_: &str| format!("<title>{}</title>", title))));
    fills.push((
        Slot::AppElement,
        Box::new(|_: &str| format!("<{ns}-app></{ns}-app>", ns = namespace)),
    ));
    fill_slots(template, fills)
}

/// Apply every `copy` rule from `src/` into `out_dir`.
///
/// A folder is copied recursively, a file is copied as is, and a rule whose
/// source does not exist is skipped. Returns the number of files copied.
pub fn apply_copy_rules(project: &Project, out_dir: &Path) -> Result<usize> {
    let src = project.layout.src_dir();
    let mut copied = 0;
    for rule in &project.config.copy {
        let from = join_segments(&src, &rule.from);
        let to = join_segments(out_dir, &rule.to);
        if folder_exists(&from) {
            copied += copy_tree(&from, &to)?;
        } else if file_exists(&from) {
            copy_file(&from, &to)?;
            copied += 1;
        } else {
            tracing::debug!("copy source {} does not exist, skipping", from.display());
        }
    }
    Ok(copied)
}

/// Where a changed file under `src/` lands according to `rule`, if the rule
/// covers it. `relative` is the path relative to `src/`.
pub fn copy_rule_target(rule: &CopyRule, relative: &Path, out_dir: &Path) -> Option<PathBuf> {
    let from = join_segments(Path::new(""), &rule.from);
    let rest = relative.strip_prefix(&from).ok()?;
    let to = join_segments(out_dir, &rule.to);
    if rest.as_os_str().is_empty() {
        Some(to)
    } else {
        Some(to.join(rest))
    }
}

fn join_segments(base: &Path, path: &str) -> PathBuf {
    path.split('/')
        .filter(|part| !part.is_empty())
        .fold(base.to_path_buf(), |dir, part| dir.join(part))
}

fn write(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).map_err(|e| ElementError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write file: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;
    use crate::project::Layout;
    use std::cell::RefCell;
    use tempfile::tempdir;

    /// Records plans and runs hooks over `.html` files like a real bundler.
    #[derive(Default)]
    struct RecordingBundler {
        plans: RefCell<Vec<BundlePlan>>,
        hooked: RefCell<Vec<String>>,
    }

    impl Bundler for RecordingBundler {
        fn bundle(&self, plan: &BundlePlan, hooks: &[&dyn LoadHook]) -> Result<BundleReport> {
            self.plans.borrow_mut().push(plan.clone());
            let src = plan
                .outfile
                .parent()
                .and_then(Path::parent)
                .map(|root| root.join("src"))
                .unwrap_or_default();
            for entry in walkdir::WalkDir::new(&src).into_iter().filter_map(|e| e.ok()) {
                for hook in hooks {
                    if hook.matches(entry.path()) {
                        let text = fs::read_to_string(entry.path()).unwrap();
                        self.hooked
                            .borrow_mut()
                            .push(hook.load(entry.path(), &text)?.contents);
                    }
                }
            }
            Ok(BundleReport {
                outfile: plan.outfile.clone(),
                hooked_files: self.hooked.borrow().len(),
                warnings: vec![],
            })
        }
    }

    fn write_file(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn project(root: &Path, config: &str) -> Project {
        Project::new(Layout::new(root), ProjectConfig::parse(config).unwrap())
    }

    #[test]
    fn test_playground_build() {
        let dir = tempdir().unwrap();
        let button = dir.path().join("src/components/demo/button");
        write_file(
            &button.join("button.ts"),
            "import t from './button.html';\nexport default class DemoButton extends HTMLElement {}",
        );
        write_file(&button.join("button.html"), "<demo-card></demo-card>");
        write_file(
            &dir.path().join("src/components/demo/card/card.ts"),
            "export default class DemoCard extends HTMLElement {}",
        );

        let project = project(dir.path(), "title: Demo Kit\n");
        let bundler = RecordingBundler::default();
        let outcome = Pipeline::new(&project, &bundler, Printer::with_color(false))
            .run(Mode::Development)
            .unwrap();

        assert_eq!(outcome.out_dir, dir.path().join("dist"));
        assert_eq!(outcome.components, 2);

        let index = fs::read_to_string(dir.path().join("dist/index.html")).unwrap();
        assert!(index.contains("<title>Demo Kit</title>"));
        assert!(index.contains("componentMap.set('DemoButton', "));
        assert!(dir.path().join("dist/favicon.svg").is_file());

        let plans = bundler.plans.borrow();
        assert_eq!(plans.len(), 1);
        assert!(!plans[0].minify);
        assert!(plans[0].sourcemap);
        assert_eq!(
            plans[0].entry,
            EntryPoint::Virtual {
                name: PLAYGROUND_ENTRY.to_string(),
                contents: "import './components/demo/button/button';\nimport './components/demo/card/card';\n"
                    .to_string(),
            }
        );

        let hooked = bundler.hooked.borrow();
        assert_eq!(hooked.len(), 1);
        assert!(hooked[0].starts_with("import './../card/card';\n"));
    }

    #[test]
    fn test_production_build_has_no_dev_banner() {
        let dir = tempdir().unwrap();
        write_file(
            &dir.path().join("src/components/demo/button/button.ts"),
            "class DemoButton extends HTMLElement {}",
        );

        let project = project(dir.path(), "{}\n");
        let bundler = RecordingBundler::default();
        let outcome = Pipeline::new(&project, &bundler, Printer::with_color(false))
            .run(Mode::Production)
            .unwrap();

        assert_eq!(outcome.out_dir, dir.path().join("build"));
        let index = fs::read_to_string(dir.path().join("build/index.html")).unwrap();
        assert!(!index.contains("element start"));
        assert!(bundler.plans.borrow()[0].minify);
    }

    #[test]
    fn test_playground_requires_components_dir() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();

        let project = project(dir.path(), "{}\n");
        let bundler = RecordingBundler::default();
        let err = Pipeline::new(&project, &bundler, Printer::with_color(false))
            .run(Mode::Development)
            .unwrap_err();

        assert!(matches!(err, ElementError::MissingComponentsDir));
        assert!(bundler.plans.borrow().is_empty());
    }

    #[test]
    fn test_app_build_uses_default_template() {
        let dir = tempdir().unwrap();
        write_file(
            &dir.path().join("src/components/shop/app/app.ts"),
            "class ShopApp extends HTMLElement {}",
        );

        let project = project(dir.path(), "namespace: shop\ntitle: Shop\n");
        let bundler = RecordingBundler::default();
        Pipeline::new(&project, &bundler, Printer::with_color(false))
            .run(Mode::Development)
            .unwrap();

        let index = fs::read_to_string(dir.path().join("dist/index.html")).unwrap();
        assert!(index.contains("<title>Shop</title>"));
        assert!(index.contains("<shop-app></shop-app>"));
        assert!(!index.contains("namespace-app"));
        assert_eq!(
            bundler.plans.borrow()[0].entry,
            EntryPoint::File(dir.path().join("src/components/shop/app/app.ts"))
        );
    }

    #[test]
    fn test_app_build_prefers_project_index() {
        let dir = tempdir().unwrap();
        write_file(
            &dir.path().join("src/components/shop/app/app.ts"),
            "class ShopApp extends HTMLElement {}",
        );
        write_file(&dir.path().join("src/index.html"), "<custom></custom>");
        write_file(&dir.path().join("src/favicon.svg"), "<svg id=\"mine\"/>");

        let project = project(dir.path(), "namespace: shop\n");
        let bundler = RecordingBundler::default();
        Pipeline::new(&project, &bundler, Printer::with_color(false))
            .run(Mode::Production)
            .unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("build/index.html")).unwrap(),
            "<custom></custom>"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("build/favicon.svg")).unwrap(),
            "<svg id=\"mine\"/>"
        );
    }

    #[test]
    fn test_failed_bundle_writes_no_page() {
        let dir = tempdir().unwrap();
        let button = dir.path().join("src/components/demo/button");
        write_file(&button.join("button.ts"), "class DemoButton extends HTMLElement {}");
        write_file(&button.join("button.html"), "<acme-icon></acme-icon>");

        let project = project(dir.path(), "{}\n");
        let bundler = RecordingBundler::default();
        let err = Pipeline::new(&project, &bundler, Printer::with_color(false))
            .run(Mode::Development)
            .unwrap_err();

        assert!(matches!(err, ElementError::UnresolvedNamespace { .. }));
        assert!(!dir.path().join("dist/index.html").exists());
        assert!(!dir.path().join("dist/favicon.svg").exists());
    }

    #[test]
    fn test_app_build_missing_entry() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/components/shop")).unwrap();

        let project = project(dir.path(), "namespace: shop\n");
        let bundler = RecordingBundler::default();
        let err = Pipeline::new(&project, &bundler, Printer::with_color(false))
            .run(Mode::Development)
            .unwrap_err();

        assert!(matches!(err, ElementError::Build { .. }));
    }

    #[test]
    fn test_copy_rules() {
        let dir = tempdir().unwrap();
        write_file(&dir.path().join("src/assets/logo.svg"), "<svg/>");
        write_file(&dir.path().join("src/robots.txt"), "User-agent: *");

        let project = project(
            dir.path(),
            "copy:\n  - from: assets\n    to: static\n  - from: robots.txt\n    to: robots.txt\n  - from: missing\n    to: nowhere\n",
        );
        let out = dir.path().join("dist");

        assert_eq!(apply_copy_rules(&project, &out).unwrap(), 2);
        assert!(out.join("static/logo.svg").is_file());
        assert!(out.join("robots.txt").is_file());
        assert!(!out.join("nowhere").exists());
    }

    #[test]
    fn test_copy_rule_target() {
        let rule = CopyRule {
            from: "assets/img".to_string(),
            to: "static".to_string(),
        };
        let out = Path::new("/p/dist");

        assert_eq!(
            copy_rule_target(&rule, Path::new("assets/img/a/logo.png"), out),
            Some(PathBuf::from("/p/dist/static/a/logo.png"))
        );
        assert_eq!(copy_rule_target(&rule, Path::new("assets/other.png"), out), None);
        assert_eq!(copy_rule_target(&rule, Path::new("assets/imgs/x.png"), out), None);
    }

    #[test]
    fn test_app_index() {
        let html = app_index(
            "<title>Default</title><namespace-app></namespace-app>",
            "Shop",
            "shop",
        );
        assert_eq!(html, "<title>Shop</title><shop-app></shop-app>");
    }
}
