use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

struct Workspace {
    _dir: TempDir,
    file: PathBuf,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let file = dir.path().join("boards.json");
        let config = dir.path().join("no-config.toml");
        Self {
            _dir: dir,
            file,
            config,
        }
    }

    /// A command acting as `user_1` in `org_1`.
    fn kanban(&self) -> Command {
        self.kanban_as(Some("user_1"), Some("org_1"))
    }

    fn kanban_as(&self, user_id: Option<&str>, org_id: Option<&str>) -> Command {
        let mut cmd = Command::cargo_bin("kanban").unwrap();
        cmd.env_remove("KANBAN_FILE")
            .env_remove("KANBAN_USER_ID")
            .env_remove("KANBAN_ORG_ID")
            .env_remove("KANBAN_DEBUG_LOG")
            .env("KANBAN_CONFIG", &self.config)
            .arg("--file")
            .arg(&self.file);
        if let Some(user_id) = user_id {
            cmd.args(["--user-id", user_id]);
        }
        if let Some(org_id) = org_id {
            cmd.args(["--org-id", org_id]);
        }
        cmd
    }

    fn run(&self, args: &[&str]) -> Value {
        let output = self
            .kanban()
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        parse_json_output(&String::from_utf8_lossy(&output))
    }

    fn fail(&self, args: &[&str]) -> Value {
        let output = self
            .kanban()
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stderr
            .clone();
        parse_json_output(&last_line(&String::from_utf8_lossy(&output)))
    }

    fn create_board(&self, title: &str) -> String {
        extract_id(&self.run(&["board", "create", "--title", title]))
    }

    fn create_list(&self, board_id: &str, title: &str) -> String {
        extract_id(&self.run(&["list", "create", "--board-id", board_id, "--title", title]))
    }

    fn create_card(&self, board_id: &str, list_id: &str, title: &str) -> String {
        extract_id(&self.run(&[
            "card",
            "create",
            "--board-id",
            board_id,
            "--list-id",
            list_id,
            "--title",
            title,
        ]))
    }

    fn board(&self, board_id: &str) -> Value {
        self.run(&["board", "get", "--id", board_id])["data"].clone()
    }
}

fn parse_json_output(output: &str) -> Value {
    serde_json::from_str(output).expect("Failed to parse JSON output")
}

fn last_line(output: &str) -> String {
    output.trim().lines().last().unwrap_or_default().to_string()
}

fn extract_id(json: &Value) -> String {
    json["data"]["id"].as_str().unwrap().to_string()
}

fn list_titles(board: &Value) -> Vec<String> {
    board["lists"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap().to_string())
        .collect()
}

fn card_titles(list: &Value) -> Vec<String> {
    list["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap().to_string())
        .collect()
}

mod board_tests {
    use super::*;

    #[test]
    fn test_board_create() {
        let ws = Workspace::new();
        let json = ws.run(&["board", "create", "--title", "Roadmap"]);

        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["data"]["title"], "Roadmap");
        assert_eq!(json["data"]["orgId"], "org_1");
        assert!(ws.file.exists());
    }

    #[test]
    fn test_board_title_too_short() {
        let ws = Workspace::new();
        let json = ws.fail(&["board", "create", "--title", "ab"]);

        assert!(!json["success"].as_bool().unwrap());
        assert_eq!(
            json["field_errors"]["title"][0],
            "Title must be between 3 and 100 characters."
        );
        assert!(!ws.file.exists());
    }

    #[test]
    fn test_board_list_is_scoped_to_org() {
        let ws = Workspace::new();
        ws.create_board("Mine");
        ws.kanban_as(Some("user_2"), Some("org_2"))
            .args(["board", "create", "--title", "Theirs"])
            .assert()
            .success();

        let json = ws.run(&["board", "list"]);
        assert_eq!(json["data"]["count"], 1);
        assert_eq!(json["data"]["items"][0]["title"], "Mine");
    }

    #[test]
    fn test_board_get_includes_lists_and_cards() {
        let ws = Workspace::new();
        let board_id = ws.create_board("Roadmap");
        let list_id = ws.create_list(&board_id, "Todo");
        ws.create_card(&board_id, &list_id, "Write docs");

        let board = ws.board(&board_id);
        assert_eq!(board["title"], "Roadmap");
        assert_eq!(list_titles(&board), vec!["Todo"]);
        assert_eq!(card_titles(&board["lists"][0]), vec!["Write docs"]);
    }

    #[test]
    fn test_board_get_other_org_is_not_found() {
        let ws = Workspace::new();
        let board_id = ws.create_board("Roadmap");

        ws.kanban_as(Some("user_2"), Some("org_2"))
            .args(["board", "get", "--id", &board_id])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Board not found"));
    }
}

mod list_tests {
    use super::*;

    #[test]
    fn test_lists_are_appended_in_order() {
        let ws = Workspace::new();
        let board_id = ws.create_board("Roadmap");

        let first = ws.run(&["list", "create", "--board-id", &board_id, "--title", "Todo"]);
        let second = ws.run(&["list", "create", "--board-id", &board_id, "--title", "Done"]);

        assert_eq!(first["data"]["order"], 1);
        assert_eq!(second["data"]["order"], 2);
        assert_eq!(list_titles(&ws.board(&board_id)), vec!["Todo", "Done"]);
    }

    #[test]
    fn test_list_create_on_unknown_board() {
        let ws = Workspace::new();
        let json = ws.fail(&[
            "list",
            "create",
            "--board-id",
            "00000000-0000-0000-0000-000000000000",
            "--title",
            "Todo",
        ]);
        assert_eq!(json["error"], "Board not found");
    }

    #[test]
    fn test_list_copy_duplicates_cards() {
        let ws = Workspace::new();
        let board_id = ws.create_board("Roadmap");
        let list_id = ws.create_list(&board_id, "Todo");
        ws.create_card(&board_id, &list_id, "One");
        ws.create_card(&board_id, &list_id, "Two");

        let json = ws.run(&["list", "copy", "--board-id", &board_id, "--id", &list_id]);
        assert_eq!(json["data"]["title"], "Todo - Copy");
        assert_ne!(json["data"]["id"].as_str().unwrap(), list_id);

        let board = ws.board(&board_id);
        assert_eq!(list_titles(&board), vec!["Todo", "Todo - Copy"]);
        assert_eq!(card_titles(&board["lists"][1]), vec!["One", "Two"]);
        assert_eq!(card_titles(&board["lists"][0]), vec!["One", "Two"]);
    }

    #[test]
    fn test_list_reorder_persists() {
        let ws = Workspace::new();
        let board_id = ws.create_board("Roadmap");
        for title in ["Todo", "Doing", "Done"] {
            ws.create_list(&board_id, title);
        }

        let json = ws.run(&[
            "list",
            "reorder",
            "--board-id",
            &board_id,
            "--from",
            "0",
            "--to",
            "2",
        ]);
        assert_eq!(json["data"]["outcome"]["status"], "persisted");
        assert_eq!(json["data"]["notifications"][0]["message"], "List reordered");
        assert_eq!(list_titles(&json["data"]["view"]), vec!["Doing", "Done", "Todo"]);

        assert_eq!(list_titles(&ws.board(&board_id)), vec!["Doing", "Done", "Todo"]);
    }

    #[test]
    fn test_list_reorder_from_missing_position() {
        let ws = Workspace::new();
        let board_id = ws.create_board("Roadmap");
        ws.create_list(&board_id, "Todo");
        ws.create_list(&board_id, "Done");

        let json = ws.fail(&[
            "list",
            "reorder",
            "--board-id",
            &board_id,
            "--from",
            "9",
            "--to",
            "0",
        ]);
        assert_eq!(json["error"], "No list at index 9, board has 2");
        assert_eq!(list_titles(&ws.board(&board_id)), vec!["Todo", "Done"]);
    }

    #[test]
    fn test_list_reorder_in_place_is_noop() {
        let ws = Workspace::new();
        let board_id = ws.create_board("Roadmap");
        ws.create_list(&board_id, "Todo");

        let json = ws.run(&[
            "list",
            "reorder",
            "--board-id",
            &board_id,
            "--from",
            "0",
            "--to",
            "0",
        ]);
        assert!(json["data"]["outcome"].is_null());
        assert_eq!(json["data"]["notifications"].as_array().unwrap().len(), 0);
    }
}

mod card_tests {
    use super::*;

    fn board_with_lists(ws: &Workspace) -> (String, String, String) {
        let board_id = ws.create_board("Roadmap");
        let todo = ws.create_list(&board_id, "Todo");
        let done = ws.create_list(&board_id, "Done");
        (board_id, todo, done)
    }

    #[test]
    fn test_card_create() {
        let ws = Workspace::new();
        let (board_id, todo, _) = board_with_lists(&ws);

        let json = ws.run(&[
            "card",
            "create",
            "--board-id",
            &board_id,
            "--list-id",
            &todo,
            "--title",
            "Write docs",
        ]);
        assert_eq!(json["data"]["title"], "Write docs");
        assert_eq!(json["data"]["listId"], todo.as_str());
        assert_eq!(json["data"]["order"], 1);
    }

    #[test]
    fn test_card_create_blank_title() {
        let ws = Workspace::new();
        let (board_id, todo, _) = board_with_lists(&ws);

        let json = ws.fail(&[
            "card",
            "create",
            "--board-id",
            &board_id,
            "--list-id",
            &todo,
            "--title",
            "   ",
        ]);
        assert_eq!(json["field_errors"]["title"][0], "Must not be blank.");
    }

    #[test]
    fn test_card_copy() {
        let ws = Workspace::new();
        let (board_id, todo, _) = board_with_lists(&ws);
        let card_id = ws.create_card(&board_id, &todo, "Write docs");

        let json = ws.run(&["card", "copy", "--board-id", &board_id, "--id", &card_id]);
        assert_eq!(json["data"]["title"], "Write docs - Copy");
        assert_eq!(json["data"]["order"], 2);

        let board = ws.board(&board_id);
        assert_eq!(
            card_titles(&board["lists"][0]),
            vec!["Write docs", "Write docs - Copy"]
        );
    }

    #[test]
    fn test_card_copy_missing() {
        let ws = Workspace::new();
        let (board_id, _, _) = board_with_lists(&ws);

        let json = ws.fail(&[
            "card",
            "copy",
            "--board-id",
            &board_id,
            "--id",
            "00000000-0000-0000-0000-000000000000",
        ]);
        assert_eq!(json["error"], "Card not Found");
    }

    #[test]
    fn test_card_update() {
        let ws = Workspace::new();
        let (board_id, todo, _) = board_with_lists(&ws);
        let card_id = ws.create_card(&board_id, &todo, "Write docs");

        let json = ws.run(&[
            "card",
            "update",
            "--board-id",
            &board_id,
            "--id",
            &card_id,
            "--description",
            "Cover the CLI",
        ]);
        assert_eq!(json["data"]["title"], "Write docs");
        assert_eq!(json["data"]["description"], "Cover the CLI");
    }

    #[test]
    fn test_card_update_without_changes() {
        let ws = Workspace::new();
        let (board_id, todo, _) = board_with_lists(&ws);
        let card_id = ws.create_card(&board_id, &todo, "Write docs");

        let json = ws.fail(&["card", "update", "--board-id", &board_id, "--id", &card_id]);
        assert_eq!(json["error"], "Nothing to update.");
    }

    #[test]
    fn test_card_delete() {
        let ws = Workspace::new();
        let (board_id, todo, _) = board_with_lists(&ws);
        let card_id = ws.create_card(&board_id, &todo, "Write docs");

        let json = ws.run(&["card", "delete", "--board-id", &board_id, "--id", &card_id]);
        assert_eq!(json["data"]["id"], card_id.as_str());

        let board = ws.board(&board_id);
        assert!(board["lists"][0]["cards"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_card_move_between_lists() {
        let ws = Workspace::new();
        let (board_id, todo, done) = board_with_lists(&ws);
        ws.create_card(&board_id, &todo, "One");
        ws.create_card(&board_id, &todo, "Two");

        let json = ws.run(&[
            "card",
            "move",
            "--board-id",
            &board_id,
            "--from-list",
            &todo,
            "--from-index",
            "0",
            "--to-list",
            &done,
            "--to-index",
            "0",
        ]);
        assert_eq!(json["data"]["notifications"][0]["message"], "Card reordered");

        let board = ws.board(&board_id);
        assert_eq!(card_titles(&board["lists"][0]), vec!["Two"]);
        assert_eq!(card_titles(&board["lists"][1]), vec!["One"]);
        assert_eq!(board["lists"][1]["cards"][0]["listId"], done.as_str());
    }

    #[test]
    fn test_card_move_from_unknown_list() {
        let ws = Workspace::new();
        let (board_id, _, done) = board_with_lists(&ws);

        let json = ws.fail(&[
            "card",
            "move",
            "--board-id",
            &board_id,
            "--from-list",
            "00000000-0000-0000-0000-000000000000",
            "--from-index",
            "0",
            "--to-list",
            &done,
            "--to-index",
            "0",
        ]);
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("No list matches droppable id"));
    }
}

mod drag_tests {
    use super::*;

    #[test]
    fn test_drag_event_json() {
        let ws = Workspace::new();
        let board_id = ws.create_board("Roadmap");
        for title in ["Todo", "Doing", "Done"] {
            ws.create_list(&board_id, title);
        }

        let event = r#"{"type":"list","source":{"droppableId":"lists","index":2},"destination":{"droppableId":"lists","index":0}}"#;
        let json = ws.run(&["drag", "--board-id", &board_id, "--event", event]);

        assert_eq!(json["data"]["outcome"]["items"], 3);
        assert_eq!(list_titles(&ws.board(&board_id)), vec!["Done", "Todo", "Doing"]);
    }

    #[test]
    fn test_drop_outside_changes_nothing() {
        let ws = Workspace::new();
        let board_id = ws.create_board("Roadmap");
        ws.create_list(&board_id, "Todo");
        ws.create_list(&board_id, "Done");

        let event = r#"{"type":"list","source":{"droppableId":"lists","index":0}}"#;
        let json = ws.run(&["drag", "--board-id", &board_id, "--event", event]);

        assert!(json["data"]["outcome"].is_null());
        assert_eq!(list_titles(&ws.board(&board_id)), vec!["Todo", "Done"]);
    }

    #[test]
    fn test_malformed_event() {
        let ws = Workspace::new();
        let board_id = ws.create_board("Roadmap");

        ws.kanban()
            .args(["drag", "--board-id", &board_id, "--event", "{\"type\":\"board\"}"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid drag event"));
    }
}

mod session_tests {
    use super::*;

    #[test]
    fn test_missing_org_is_unauthorized() {
        let ws = Workspace::new();

        ws.kanban_as(Some("user_1"), None)
            .args(["board", "create", "--title", "Roadmap"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unauthorized"));
        assert!(!ws.file.exists());
    }

    #[test]
    fn test_missing_user_cannot_read() {
        let ws = Workspace::new();
        ws.create_board("Roadmap");

        ws.kanban_as(None, Some("org_1"))
            .args(["board", "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unauthorized"));
    }

    #[test]
    fn test_config_file_supplies_session() {
        let ws = Workspace::new();
        std::fs::write(&ws.config, "user_id = \"user_1\"\norg_id = \"org_1\"\n").unwrap();
        ws.create_board("Roadmap");

        let output = ws
            .kanban_as(None, None)
            .args(["board", "list"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let json = parse_json_output(&String::from_utf8_lossy(&output));
        assert_eq!(json["data"]["count"], 1);
    }

    #[test]
    fn test_file_is_required() {
        let ws = Workspace::new();

        Command::cargo_bin("kanban")
            .unwrap()
            .env_remove("KANBAN_FILE")
            .env("KANBAN_CONFIG", &ws.config)
            .args(["board", "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--file is required"));
    }
}

#[test]
fn test_completions() {
    Command::cargo_bin("kanban")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kanban"));
}
