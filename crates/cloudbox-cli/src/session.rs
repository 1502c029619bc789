use std::path::PathBuf;

use cloudbox_storage::{InMemoryStorageDriver, StorageDriver, StorageResult, SyntheticStream};
use cloudbox_types::{Container, Object, UsageMetadata};
use colored::Colorize;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::script::ScriptCommand;

/// Result of one script command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Container(Container),
    Containers(Vec<Container>),
    Object(Object),
    Objects(Vec<Object>),
    Usage(UsageMetadata),
    ContainerDeleted(String),
    ObjectDeleted { container: String, object: String },
    Downloaded { object: Object, path: PathBuf },
}

/// One driver shared by every command of a session.
pub struct Session {
    driver: InMemoryStorageDriver,
}

impl Session {
    pub fn new(driver: InMemoryStorageDriver) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &InMemoryStorageDriver {
        &self.driver
    }

    pub fn execute(&self, command: ScriptCommand) -> StorageResult<Outcome> {
        let driver = &self.driver;
        let outcome = match command {
            ScriptCommand::Create { container } => {
                Outcome::Container(driver.create_container(&container)?)
            }
            ScriptCommand::DeleteContainer { container } => {
                let c = driver.get_container(&container)?;
                driver.delete_container(&c)?;
                Outcome::ContainerDeleted(container)
            }
            ScriptCommand::List => Outcome::Containers(driver.list_containers()?),
            ScriptCommand::Objects { container } => {
                let c = driver.get_container(&container)?;
                Outcome::Objects(driver.list_container_objects(&c)?)
            }
            ScriptCommand::Get { container, object } => {
                Outcome::Object(driver.get_object(&container, &object)?)
            }
            ScriptCommand::Put {
                container,
                object,
                file,
            } => {
                let c = driver.get_container(&container)?;
                Outcome::Object(driver.upload_object(&file, &c, &object, None)?)
            }
            ScriptCommand::PutStream {
                container,
                object,
                chunks,
                chunk_len,
            } => {
                let c = driver.get_container(&container)?;
                let source = SyntheticStream::try_new(chunks, chunk_len)?;
                Outcome::Object(driver.upload_object_via_stream(&source, &c, &object, None)?)
            }
            ScriptCommand::Rm { container, object } => {
                let o = driver.get_object(&container, &object)?;
                driver.delete_object(&o)?;
                Outcome::ObjectDeleted { container, object }
            }
            ScriptCommand::Download {
                container,
                object,
                dest,
                overwrite,
            } => {
                let o = driver.get_object(&container, &object)?;
                driver.download_object(&o, &dest, overwrite, true)?;
                Outcome::Downloaded {
                    object: o,
                    path: dest,
                }
            }
            ScriptCommand::Stat => Outcome::Usage(driver.get_meta_data()?),
        };
        Ok(outcome)
    }
}

/// Render an outcome for display.
pub fn render(outcome: &Outcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string(outcome).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
        }
        OutputFormat::Text => render_text(outcome),
    }
}

fn render_text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Container(c) => format!("{} {}", "✓".green().bold(), c),
        Outcome::Containers(cs) if cs.is_empty() => "No containers.".to_string(),
        Outcome::Containers(cs) => cs
            .iter()
            .map(|c| format!("  {}", c.name.yellow()))
            .collect::<Vec<_>>()
            .join("\n"),
        Outcome::Object(o) => format!("{} {}", "✓".green().bold(), o),
        Outcome::Objects(os) if os.is_empty() => "No objects.".to_string(),
        Outcome::Objects(os) => os
            .iter()
            .map(|o| format!("  {}  {} bytes", o.name.yellow(), o.size))
            .collect::<Vec<_>>()
            .join("\n"),
        Outcome::Usage(u) => format!(
            "containers: {}  objects: {}  bytes used: {}",
            u.container_count.to_string().bold(),
            u.object_count.to_string().bold(),
            u.bytes_used.to_string().bold()
        ),
        Outcome::ContainerDeleted(name) => {
            format!("{} Deleted container {}", "✓".green(), name.yellow())
        }
        Outcome::ObjectDeleted { container, object } => format!(
            "{} Deleted {}/{}",
            "✓".green(),
            container.yellow(),
            object.yellow()
        ),
        Outcome::Downloaded { object, path } => format!(
            "{} Downloaded {} ({} bytes) to {}",
            "✓".green(),
            object.name.yellow(),
            object.size,
            path.display()
        ),
    }
}
