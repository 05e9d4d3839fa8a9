use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::PathBuf;

use clickup::{ClickUp, Task, TaskUpdateRequest};

#[derive(Debug, PartialEq)]
pub enum Command {
    Task { id: String },
    Update { id: String, update: TaskUpdateRequest },
    Webhook { signature: String, file: Option<PathBuf> },
    Help,
}

pub fn parse_args(args: &[String]) -> Result<Command> {
    let Some((command, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };

    match command.as_str() {
        "task" => match rest {
            [id] => Ok(Command::Task { id: id.clone() }),
            _ => bail!("Usage: cu task <id>"),
        },
        "update" => {
            let (id, update) = parse_update_args(rest)?;
            Ok(Command::Update { id, update })
        }
        "webhook" => match rest {
            [signature] => Ok(Command::Webhook {
                signature: signature.clone(),
                file: None,
            }),
            [signature, file] => Ok(Command::Webhook {
                signature: signature.clone(),
                file: Some(PathBuf::from(file)),
            }),
            _ => bail!("Usage: cu webhook <signature> [file]"),
        },
        "help" | "-h" | "--help" => Ok(Command::Help),
        other => bail!("Unknown command: {other}. Run `cu help` for usage."),
    }
}

/// Parse `cu update` arguments into (task id, sparse update).
///
/// Supported forms:
///   cu update abc123 --status "acceptance"
///   cu update abc123 --name "New name" --priority 2
///   cu update abc123 --assign 183 --unassign 42 --archive
pub fn parse_update_args(args: &[String]) -> Result<(String, TaskUpdateRequest)> {
    let Some((id, flags)) = args.split_first() else {
        bail!("Usage: cu update <id> [--name N] [--desc D] [--status S] [--priority P] [--estimate MS] [--assign ID] [--unassign ID] [--archive|--unarchive]");
    };
    if id.starts_with('-') {
        bail!("Task id must come before flags");
    }

    let mut update = TaskUpdateRequest::new();
    let mut i = 0;

    while i < flags.len() {
        let flag = flags[i].as_str();
        match flag {
            "--archive" => update = update.with_archived(true),
            "--unarchive" => update = update.with_archived(false),
            "-n" | "--name" | "-d" | "--desc" | "--description" | "-s" | "--status"
            | "-p" | "--priority" | "--estimate" | "--assign" | "--unassign" => {
                i += 1;
                let Some(value) = flags.get(i) else {
                    bail!("Missing value for {flag}");
                };
                update = match flag {
                    "-n" | "--name" => update.with_name(value.as_str()),
                    "-d" | "--desc" | "--description" => update.with_description(value.as_str()),
                    "-s" | "--status" => update.with_status(value.as_str()),
                    "-p" | "--priority" => update.with_priority(parse_int(flag, value)?),
                    "--estimate" => update.with_time_estimate(parse_int(flag, value)?),
                    "--assign" => update.assign(parse_int(flag, value)?),
                    _ => update.unassign(parse_int(flag, value)?),
                };
            }
            other => bail!("Unknown flag: {other}"),
        }
        i += 1;
    }

    if update.is_empty() {
        bail!("Nothing to update: pass at least one flag");
    }

    Ok((id.clone(), update))
}

fn parse_int(flag: &str, value: &str) -> Result<i64> {
    value
        .parse()
        .with_context(|| format!("{flag} expects a whole number, got {value:?}"))
}

pub async fn run(command: Command, client: &dyn ClickUp) -> Result<()> {
    match command {
        Command::Task { id } => {
            let task = client.get_task(&id).await?;
            print_task(&task);
        }
        Command::Update { id, update } => {
            client.update_task(&id, &update).await?;
            println!("Updated {id}");
        }
        Command::Webhook { signature, file } => {
            let body = match &file {
                Some(path) => std::fs::read(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = Vec::new();
                    std::io::stdin()
                        .read_to_end(&mut buf)
                        .context("Failed to read webhook body from stdin")?;
                    buf
                }
            };

            client.verify_signature(&signature, &body)?;
            let webhook = client.parse_webhook(Box::new(body.as_slice()))?;
            println!("webhook {}: {} on task {}", webhook.id, webhook.event, webhook.task_id);
        }
        Command::Help => print_help(),
    }
    Ok(())
}

fn print_task(task: &Task) {
    println!("{}: {}", task.id, task.name);
    if let Some(status) = task.status() {
        println!("  status: {status}");
    }
    if let Some(url) = &task.url {
        println!("  {url}");
    }
}

pub fn print_help() {
    println!("cu: ClickUp task and webhook tool\n");
    println!("USAGE:");
    println!("  cu task <id>                    Show a task");
    println!("  cu update <id> [options]        Change fields on a task");
    println!("  cu webhook <signature> [file]   Verify and decode a webhook body (stdin if no file)");
    println!();
    println!("UPDATE OPTIONS:");
    println!("  -n, --name <text>       New name");
    println!("  -d, --desc <text>       New description");
    println!("  -s, --status <status>   New status; fails if ClickUp does not apply it");
    println!("  -p, --priority <n>      Priority (1 urgent .. 4 low)");
    println!("  --estimate <ms>         Time estimate in milliseconds");
    println!("  --assign <user id>      Add an assignee (repeatable)");
    println!("  --unassign <user id>    Remove an assignee (repeatable)");
    println!("  --archive, --unarchive");
    println!();
    println!("Credentials come from ~/.clickup/config.toml or CLICKUP_API_KEY / CLICKUP_WEBHOOK_SECRET.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickup::{signature, MockClient, Status, TaskStatus, Webhook};

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_shows_help() {
        assert_eq!(parse_args(&args(&[])).unwrap(), Command::Help);
        assert_eq!(parse_args(&args(&["--help"])).unwrap(), Command::Help);
    }

    #[test]
    fn parse_task_command() {
        let command = parse_args(&args(&["task", "abc123"])).unwrap();
        assert_eq!(command, Command::Task { id: "abc123".into() });
    }

    #[test]
    fn parse_task_without_id_fails() {
        assert!(parse_args(&args(&["task"])).is_err());
    }

    #[test]
    fn parse_webhook_with_and_without_file() {
        let command = parse_args(&args(&["webhook", "deadbeef"])).unwrap();
        assert_eq!(
            command,
            Command::Webhook {
                signature: "deadbeef".into(),
                file: None
            }
        );

        let command = parse_args(&args(&["webhook", "deadbeef", "body.json"])).unwrap();
        assert!(matches!(command, Command::Webhook { file: Some(_), .. }));
    }

    #[test]
    fn unknown_command_fails() {
        let err = parse_args(&args(&["delete", "abc"])).unwrap_err();
        assert!(err.to_string().contains("Unknown command"));
    }

    #[test]
    fn parse_status_update() {
        let (id, update) = parse_update_args(&args(&["abc123", "--status", "acceptance"])).unwrap();
        assert_eq!(id, "abc123");
        assert_eq!(update, TaskUpdateRequest::new().with_status(Status::Acceptance));
    }

    #[test]
    fn parse_custom_status_with_spaces() {
        let (_, update) = parse_update_args(&args(&["abc123", "-s", "QA Review"])).unwrap();
        assert_eq!(update.status, Some(Status::Other("QA Review".into())));
    }

    #[test]
    fn parse_every_flag() {
        let (_, update) = parse_update_args(&args(&[
            "abc123",
            "--name",
            "Fix login",
            "--desc",
            "",
            "--priority",
            "2",
            "--estimate",
            "3600000",
            "--assign",
            "183",
            "--assign",
            "184",
            "--unassign",
            "42",
            "--archive",
        ]))
        .unwrap();

        assert_eq!(update.name.as_deref(), Some("Fix login"));
        assert_eq!(update.description.as_deref(), Some(""));
        assert_eq!(update.priority, Some(2));
        assert_eq!(update.time_estimate, Some(3_600_000));
        let assignees = update.assignees.unwrap();
        assert_eq!(assignees.add, vec![183, 184]);
        assert_eq!(assignees.rem, vec![42]);
        assert_eq!(update.archived, Some(true));
        assert_eq!(update.status, None);
    }

    #[test]
    fn parse_update_without_flags_fails() {
        let err = parse_update_args(&args(&["abc123"])).unwrap_err();
        assert!(err.to_string().contains("Nothing to update"));
    }

    #[test]
    fn parse_update_missing_value_fails() {
        let err = parse_update_args(&args(&["abc123", "--status"])).unwrap_err();
        assert!(err.to_string().contains("Missing value for --status"));
    }

    #[test]
    fn parse_update_bad_number_fails() {
        let err = parse_update_args(&args(&["abc123", "--priority", "high"])).unwrap_err();
        assert!(err.to_string().contains("whole number"));
    }

    #[test]
    fn parse_update_flag_before_id_fails() {
        assert!(parse_update_args(&args(&["--archive"])).is_err());
        assert!(parse_update_args(&args(&[])).is_err());
    }

    #[tokio::test]
    async fn run_update_goes_through_client() {
        let mock = MockClient::default();
        let command = parse_args(&args(&["update", "abc123", "--archive"])).unwrap();

        run(command, &mock).await.unwrap();

        let updates = mock.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, "abc123");
    }

    #[tokio::test]
    async fn run_task_reports_remote_errors() {
        let mock = MockClient::default().with_get_task_status(404);

        let err = run(Command::Task { id: "abc123".into() }, &mock)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "remote service returned status 404");
    }

    #[tokio::test]
    async fn run_webhook_verifies_before_decoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.json");
        let body = r#"{"webhook_id": "w1", "event": "taskStatusUpdated", "task_id": "t1"}"#;
        std::fs::write(&path, body).unwrap();

        let mock = MockClient::default()
            .with_rejected_signatures()
            .with_rejected_webhooks();
        let command = Command::Webhook {
            signature: signature::sign(body.as_bytes(), "s"),
            file: Some(path.clone()),
        };
        let err = run(command, &mock).await.unwrap_err();
        assert_eq!(err.to_string(), "signature mismatch");

        let mock = MockClient::default().with_webhook(Webhook::default());
        let command = Command::Webhook {
            signature: "anything".into(),
            file: Some(path),
        };
        run(command, &mock).await.unwrap();
    }

    #[tokio::test]
    async fn run_update_reports_ignored_status_change() {
        let mock = MockClient::new(Task {
            id: "abc123".into(),
            status: Some(TaskStatus {
                status: Status::ReadyForDevelopment,
            }),
            ..Task::default()
        })
        .ignoring_status_updates()
        .with_update_task_status(503);

        let command = parse_args(&args(&["update", "abc123", "--status", "acceptance"])).unwrap();
        let err = run(command, &mock).await.unwrap_err();
        assert_eq!(err.to_string(), "remote service returned status 503");

        let mock = MockClient::default().ignoring_status_updates();
        let command = parse_args(&args(&["update", "abc123", "--status", "acceptance"])).unwrap();
        let err = run(command, &mock).await.unwrap_err();
        assert!(err.to_string().starts_with("task status was not updated"));
        assert_eq!(mock.updates().len(), 1);
    }

    #[tokio::test]
    async fn run_task_prints_without_error() {
        let mock = MockClient::new(Task {
            id: "abc123".into(),
            name: "Fix login".into(),
            status: Some(TaskStatus {
                status: Status::InDevelopment,
            }),
            url: Some("https://app.clickup.com/t/abc123".into()),
        });
        run(Command::Task { id: "abc123".into() }, &mock).await.unwrap();
    }
}
