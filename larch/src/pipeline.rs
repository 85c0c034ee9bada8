use log::info;
use std::path::{Path, PathBuf};

/// One named step of a file pipeline. A stage consumes the previous
/// stage's output path and produces `output`.
pub struct Stage {
    pub name: Box<str>,
    pub output: PathBuf,
    run: Box<dyn Fn(&Path) -> anyhow::Result<PathBuf>>,
}

impl Stage {
    pub fn new(
        name: &str,
        output: impl Into<PathBuf>,
        run: impl Fn(&Path) -> anyhow::Result<PathBuf> + 'static,
    ) -> Self {
        Stage {
            name: Box::from(name),
            output: output.into(),
            run: Box::new(run),
        }
    }

    /// Stage that shells out to an external tool with a fixed argument
    /// list. A non-success exit status aborts the pipeline.
    pub fn command(name: &str, output: impl Into<PathBuf>, program: &str, args: &[&str]) -> Self {
        let output = output.into();
        let program = program.to_string();
        let args: Vec<String> = args.iter().map(|x| x.to_string()).collect();
        let expected = output.clone();
        Stage::new(name, output, move |_input| {
            let status = std::process::Command::new(&program).args(&args).status()?;
            if !status.success() {
                anyhow::bail!("{} exited with {}", program, status);
            }
            Ok(expected.clone())
        })
    }
}

/// What happened to each stage of a run.
#[derive(Debug, Clone)]
pub struct StageOutcome {
    pub name: Box<str>,
    pub output: PathBuf,
    pub skipped: bool,
}

/// An immutable sequence of named stages threaded over a file path. Each
/// stage is invoked at most once per run: a stage whose expected output
/// already exists is skipped unless `force` is set.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline { stages: vec![] }
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn run(&self, input: &Path, force: bool) -> anyhow::Result<Vec<StageOutcome>> {
        let mut current = input.to_path_buf();
        let mut outcomes = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            if !force && stage.output.exists() {
                info!(
                    "{}: {} already exists, skipping",
                    stage.name,
                    stage.output.display()
                );
                current = stage.output.clone();
                outcomes.push(StageOutcome {
                    name: stage.name.clone(),
                    output: current.clone(),
                    skipped: true,
                });
                continue;
            }

            info!(
                "{}: {} -> {}",
                stage.name,
                current.display(),
                stage.output.display()
            );
            current = (stage.run)(&current)?;
            outcomes.push(StageOutcome {
                name: stage.name.clone(),
                output: current.clone(),
                skipped: false,
            });
        }

        Ok(outcomes)
    }
}
