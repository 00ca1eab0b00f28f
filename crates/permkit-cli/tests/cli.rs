use assert_cmd::Command;
use predicates::prelude::*;

const NOW: &str = "2026-01-31T12:00:00.750Z";

fn permkit() -> Command {
    Command::cargo_bin("permkit").unwrap()
}

// ── resolve ─────────────────────────────────────────────────────────────────

#[test]
fn test_resolve_relative_month_clamps() {
    permkit()
        .args(["resolve", "1", "month", "--now", NOW])
        .assert()
        .success()
        .stdout("2026-02-28T12:00:00+00:00\n");
}

#[test]
fn test_resolve_bare_number_is_days() {
    permkit()
        .args(["resolve", "5", "--now", NOW])
        .assert()
        .success()
        .stdout("2026-02-05T12:00:00+00:00\n");
}

#[test]
fn test_resolve_absolute_missing_seconds() {
    permkit()
        .args(["resolve", "2013-01-01t00:00", "--now", NOW])
        .assert()
        .success()
        .stdout("2013-01-01T00:00:00+00:00\n");
}

#[test]
fn test_resolve_absolute_in_timezone() {
    permkit()
        .args([
            "resolve",
            "2026-01-15T09:00",
            "--now",
            NOW,
            "--timezone",
            "America/New_York",
        ])
        .assert()
        .success()
        .stdout("2026-01-15T14:00:00+00:00\n");
}

#[test]
fn test_resolve_blank_is_no_value() {
    permkit()
        .args(["resolve", "  ", "--now", NOW])
        .assert()
        .success()
        .stdout("no value\n");
}

#[test]
fn test_resolve_zero_fails() {
    permkit()
        .args(["resolve", "0d", "--now", NOW])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value: duration/timestamp"));
}

#[test]
fn test_resolve_garbage_fails() {
    permkit()
        .args(["resolve", "not", "a", "date", "--now", NOW])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duration/timestamp"));
}

#[test]
fn test_resolve_bad_timezone_fails() {
    permkit()
        .args(["resolve", "5d", "--timezone", "Nowhere/Land"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}

#[test]
fn test_resolve_bad_now_fails() {
    permkit()
        .args(["resolve", "5d", "--now", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --now"));
}

// ── permissions ─────────────────────────────────────────────────────────────

const PERMISSIONS: &str = r#"[
    {"permission": "world.build", "value": true, "source": "permkit"},
    {"permission": "Chat.Color", "value": false, "source": "Other"},
    {"permission": "admin.kick", "value": true}
]"#;

#[test]
fn test_permissions_sorted_plain() {
    permkit()
        .args(["permissions", "--plain"])
        .write_stdin(PERMISSIONS)
        .assert()
        .success()
        .stdout("- admin.kick: true\n- chat.color: false *\n- world.build: true\n");
}

#[test]
fn test_permissions_colored() {
    permkit()
        .args(["permissions", "-f", "admin"])
        .write_stdin(PERMISSIONS)
        .assert()
        .success()
        .stdout("§2- §6admin.kick§2: §atrue\n");
}

#[test]
fn test_permissions_verbose_with_header() {
    permkit()
        .args([
            "permissions",
            "--plain",
            "--verbose",
            "--header",
            "{YELLOW}Permissions:",
            "--filter",
            "CHAT",
        ])
        .write_stdin(PERMISSIONS)
        .assert()
        .success()
        .stdout("Permissions:\n- chat.color: false [Other]\n");
}

#[test]
fn test_permissions_no_match() {
    permkit()
        .args(["permissions", "--plain", "--filter", "fly"])
        .write_stdin(PERMISSIONS)
        .assert()
        .success()
        .stdout("No matching permissions found.\n");
}

#[test]
fn test_permissions_blank_key_rejected() {
    permkit()
        .args(["permissions"])
        .write_stdin(r#"[{"permission": " ", "value": true}]"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse permissions JSON"));
}

#[test]
fn test_permissions_missing_file() {
    permkit()
        .args(["permissions", "/definitely/not/here.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

// ── groups ──────────────────────────────────────────────────────────────────

const MEMBERSHIPS: &str = r#"[
    {"member": "alice", "group": "Builders"},
    {"member": "alice", "group": "Trial", "expiration": "2026-01-01T00:00:00Z"},
    {"member": "bob", "group": "Vip", "expiration": "2026-03-01T18:30:00Z"}
]"#;

#[test]
fn test_groups_line() {
    permkit()
        .args(["groups", "--plain", "--now", NOW])
        .write_stdin(MEMBERSHIPS)
        .assert()
        .success()
        .stdout("Builders, Trial[2026-01-01T00:00], Vip[2026-03-01T18:30]\n");
}

#[test]
fn test_groups_default_when_all_expired() {
    permkit()
        .args(["groups", "--plain", "--default", "Guest", "--now", NOW])
        .write_stdin(r#"[{"member": "eve", "group": "Trial", "expiration": "2026-01-31T12:00:00Z"}]"#)
        .assert()
        .success()
        .stdout("Trial[2026-01-31T12:00], Guest\n");
}

#[test]
fn test_groups_player_offline_warning() {
    permkit()
        .args(["groups", "--plain", "--player", "bob", "--now", NOW, "--timezone", "Europe/Berlin"])
        .write_stdin(MEMBERSHIPS)
        .assert()
        .success()
        .stdout(
            "(Player not online, make sure the name is correct)\nVip[2026-03-01T19:30]\n",
        );
}

#[test]
fn test_groups_player_online_no_warning() {
    permkit()
        .args(["groups", "--plain", "--player", "alice", "--online", "alice,bob", "--now", NOW])
        .write_stdin(MEMBERSHIPS)
        .assert()
        .success()
        .stdout("Builders, Trial[2026-01-01T00:00]\n");
}

#[test]
fn test_groups_player_name_case_insensitive() {
    permkit()
        .args(["groups", "--plain", "--player", "Bob", "--online", "BOB", "--now", NOW])
        .write_stdin(MEMBERSHIPS)
        .assert()
        .success()
        .stdout("Vip[2026-03-01T18:30]\n");
}
