use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cli_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bf"))
}

#[test]
fn init_insert_search_dump() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("words.bfsn");
    let file = file.to_str().unwrap();

    cli_cmd()
        .args(["init", "--file", file, "--size", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bits=104 hashers=4"));

    cli_cmd()
        .args(["init", "--file", file, "--size", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    cli_cmd()
        .args(["insert", "--file", file, "Hello, world!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inserted 1 item(s)"));

    cli_cmd()
        .args(["search", "--file", file, "Hello, world!", "absent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello, world!: possibly present"))
        .stdout(predicate::str::contains("absent: not present"));

    let mut golden = vec!['0'; 104];
    for i in [14, 74, 76, 92] {
        golden[i] = '1';
    }
    let golden: String = golden.into_iter().collect();
    cli_cmd()
        .args(["dump", "--file", file])
        .assert()
        .success()
        .stdout(predicate::str::contains(golden));
}

#[test]
fn hex_items_and_json_info() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("xxh.bfsn");
    let file = file.to_str().unwrap();

    cli_cmd()
        .args(["init", "--file", file, "--size", "1000", "--hashers", "xxh3", "--k", "6"])
        .assert()
        .success();

    cli_cmd()
        .args(["insert", "--file", file, "--hex", "deadbeef", "00ff"])
        .assert()
        .success();

    cli_cmd()
        .args(["search", "--file", file, "--hex", "deadbeef"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deadbeef: possibly present"));

    cli_cmd()
        .args(["insert", "--file", file, "--hex", "zz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad hex item"));

    cli_cmd()
        .args(["info", "--file", file, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hasher_set\": \"xxh3\""))
        .stdout(predicate::str::contains("\"hasher_count\": 6"))
        .stdout(predicate::str::contains("\"bit_len\": 1000"));
}

#[test]
fn missing_file_fails() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("nope.bfsn");
    cli_cmd()
        .args(["dump", "--file", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("open snapshot"));
}
