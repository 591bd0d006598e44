//! Command implementations. Each returns the JSON document to print.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use pipeline::OperationResult;
use resource::{codec, DomainResource, Resource};
use tracing::{debug, info};

/// Which projection of the pipeline result to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shape {
    /// Flat, name-keyed Parameters document
    Parameters,
    /// Ordered collection Bundle
    Bundle,
}

fn read_resource(path: &Path) -> Result<Resource> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let resource = codec::from_json(&json)
        .with_context(|| format!("Failed to decode '{}'", path.display()))?;
    debug!(path = %path.display(), type_tag = resource.type_tag(), "Read resource");
    Ok(resource)
}

fn render<T>(result: &OperationResult<T>, shape: Shape) -> Result<String> {
    let document = match shape {
        Shape::Parameters => result.as_parameters(),
        Shape::Bundle => result.as_bundle(),
    };
    Ok(codec::to_json_pretty(&document)?)
}

pub fn classify(path: &Path, name: Option<String>, shape: Shape) -> Result<String> {
    let resource = read_resource(path)?;
    let result = match name {
        Some(name) => OperationResult::of_named(resource, name),
        None => OperationResult::of(resource),
    };
    render(&result, shape)
}

/// Runs one step per file. Files after the first error outcome are not read.
pub fn run_chain(files: &[PathBuf], replace: bool) -> Result<OperationResult<Resource>> {
    let (first, rest) = files.split_first().context("No resource files given")?;

    let mut result = OperationResult::of(read_resource(first)?);
    for path in rest {
        result = if replace {
            result.try_operate_resource(|_| read_resource(path))?
        } else {
            result.try_operate_resource_combined(|_| read_resource(path))?
        };
    }

    if result.is_failure() {
        info!("Pipeline stopped on an error outcome");
    }
    Ok(result)
}

pub fn chain(files: &[PathBuf], replace: bool, shape: Shape) -> Result<String> {
    render(&run_chain(files, replace)?, shape)
}

pub fn filter(path: &Path, names: &[String]) -> Result<String> {
    let parameters = match read_resource(path)? {
        Resource::Parameters(parameters) => parameters,
        other => bail!(
            "'{}' holds a {}, expected Parameters",
            path.display(),
            other.type_tag()
        ),
    };
    Ok(codec::to_json_pretty(&parameters.filter(names).into())?)
}
