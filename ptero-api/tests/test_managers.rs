//! Integration tests for the resource managers against a mock panel.
//!
//! Each test checks the method, path, query and body a manager call produces,
//! and how the response is decoded.

mod common;

use ptero_api::{CreateBackupOptions, PowerSignal};
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, query_param};

use common::*;

// ---- Servers ----

#[tokio::test]
async fn servers_list_decodes_envelope_and_pagination() {
    let server = setup_mock_server().await;
    authed("GET", "/api/client")
        .respond_with(success_response(list(
            "server",
            vec![
                server_attributes("1a7ce997", "Wuhu Island"),
                server_attributes("5b2ef312", "Lobby"),
            ],
        )))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let servers = client.servers().list().await.unwrap();
    assert_eq!(servers.len(), 2);
    assert_eq!(servers.pagination().unwrap().total, 2);
    let names: Vec<&str> = servers.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Wuhu Island", "Lobby"]);
}

#[tokio::test]
async fn servers_resources() {
    let server = setup_mock_server().await;
    authed("GET", server_route("/resources").as_str())
        .respond_with(success_response(resource(
            "stats",
            json!({
                "current_state": "running",
                "is_suspended": false,
                "resources": {
                    "memory_bytes": 588701696u64,
                    "cpu_absolute": 0.347,
                    "disk_bytes": 118725618u64,
                    "network_rx_bytes": 16161,
                    "network_tx_bytes": 10040,
                    "uptime": 1520
                }
            }),
        )))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let usage = client.servers().resources(SERVER).await.unwrap();
    assert_eq!(usage.current_state, "running");
    assert_eq!(usage.resources.memory_bytes, 588_701_696);
    assert_eq!(usage.resources.uptime, 1520);
}

#[tokio::test]
async fn servers_power_and_command_bodies() {
    let server = setup_mock_server().await;
    authed("POST", server_route("/power").as_str())
        .and(body_json(json!({ "signal": "restart" })))
        .respond_with(no_content())
        .expect(1)
        .mount(&server)
        .await;
    authed("POST", server_route("/command").as_str())
        .and(body_json(json!({ "command": "say hello" })))
        .respond_with(no_content())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.servers().power(SERVER, PowerSignal::Restart).await.unwrap();
    client.servers().send_command(SERVER, "say hello").await.unwrap();
}

#[tokio::test]
async fn servers_rename_and_reinstall() {
    let server = setup_mock_server().await;
    authed("POST", server_route("/settings/rename").as_str())
        .and(body_json(json!({ "name": "New Name" })))
        .respond_with(no_content())
        .expect(1)
        .mount(&server)
        .await;
    authed("POST", server_route("/settings/reinstall").as_str())
        .respond_with(wiremock::ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.servers().rename(SERVER, " New Name ").await.unwrap();
    client.servers().reinstall(SERVER).await.unwrap();
}

#[tokio::test]
async fn command_on_offline_server_is_panel_error() {
    let server = setup_mock_server().await;
    authed("POST", server_route("/command").as_str())
        .respond_with(panel_error(
            502,
            "HttpException",
            "Server must be online in order to send commands.",
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.servers().send_command(SERVER, "list").await.unwrap_err();
    assert!(client.is_pterodactyl_error(&err));
    assert_eq!(
        err.as_pterodactyl().unwrap().detail,
        "Server must be online in order to send commands."
    );
}

// ---- Files ----

#[tokio::test]
async fn files_list_sends_directory_query() {
    let server = setup_mock_server().await;
    authed("GET", server_route("/files/list").as_str())
        .and(query_param("directory", "/plugins"))
        .respond_with(success_response(list(
            "file_object",
            vec![json!({
                "name": "config.yml", "mode": "-rw-r--r--", "size": 1208,
                "is_file": true, "is_symlink": false, "mimetype": "text/plain",
                "created_at": "2020-07-07T13:38:03+00:00",
                "modified_at": "2020-07-07T13:38:03+00:00"
            })],
        )))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let files = client.files().list(SERVER, "/plugins").await.unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "config.yml");
    assert!(!files[0].is_directory());
}

#[tokio::test]
async fn files_contents_returns_raw_text() {
    let server = setup_mock_server().await;
    authed("GET", server_route("/files/contents").as_str())
        .and(query_param("file", "/server.properties"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("motd=Hello\n"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let text = client.files().contents(SERVER, "/server.properties").await.unwrap();
    assert_eq!(text, "motd=Hello\n");
}

#[tokio::test]
async fn files_write_sends_plain_text_body() {
    let server = setup_mock_server().await;
    authed("POST", server_route("/files/write").as_str())
        .and(query_param("file", "/eula.txt"))
        .and(header("Content-Type", "text/plain"))
        .and(body_string("eula=true"))
        .respond_with(no_content())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.files().write(SERVER, "/eula.txt", "eula=true").await.unwrap();
}

#[tokio::test]
async fn files_signed_urls() {
    let server = setup_mock_server().await;
    authed("GET", server_route("/files/download").as_str())
        .and(query_param("file", "/world.zip"))
        .respond_with(success_response(resource(
            "signed_url",
            json!({ "url": "https://node.example.com/download/file?token=abc" }),
        )))
        .mount(&server)
        .await;
    authed("GET", server_route("/files/upload").as_str())
        .respond_with(success_response(resource(
            "signed_url",
            json!({ "url": "https://node.example.com/upload/file?token=def" }),
        )))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let download = client.files().download_url(SERVER, "/world.zip").await.unwrap();
    assert!(download.ends_with("token=abc"));
    let upload = client.files().upload_url(SERVER).await.unwrap();
    assert!(upload.ends_with("token=def"));
}

#[tokio::test]
async fn files_mutations_send_expected_bodies() {
    let server = setup_mock_server().await;
    authed("PUT", server_route("/files/rename").as_str())
        .and(body_json(json!({
            "root": "/",
            "files": [{ "from": "old.txt", "to": "new.txt" }]
        })))
        .respond_with(no_content())
        .expect(1)
        .mount(&server)
        .await;
    authed("POST", server_route("/files/copy").as_str())
        .and(body_json(json!({ "location": "/new.txt" })))
        .respond_with(no_content())
        .expect(1)
        .mount(&server)
        .await;
    authed("POST", server_route("/files/delete").as_str())
        .and(body_json(json!({ "root": "/logs", "files": ["a.log", "b.log"] })))
        .respond_with(no_content())
        .expect(1)
        .mount(&server)
        .await;
    authed("POST", server_route("/files/create-folder").as_str())
        .and(body_json(json!({ "root": "/", "name": "mods" })))
        .respond_with(no_content())
        .expect(1)
        .mount(&server)
        .await;
    authed("POST", server_route("/files/decompress").as_str())
        .and(body_json(json!({ "root": "/", "file": "world.zip" })))
        .respond_with(no_content())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let files = client.files();
    files.rename(SERVER, "", "old.txt", "new.txt").await.unwrap();
    files.copy(SERVER, "/new.txt").await.unwrap();
    files.delete(SERVER, "/logs", &["a.log", "b.log"]).await.unwrap();
    files.create_folder(SERVER, "/", "mods").await.unwrap();
    files.decompress(SERVER, "/", "world.zip").await.unwrap();
}

#[tokio::test]
async fn files_compress_returns_archive() {
    let server = setup_mock_server().await;
    authed("POST", server_route("/files/compress").as_str())
        .and(body_json(json!({ "root": "/", "files": ["world", "plugins"] })))
        .respond_with(success_response(resource(
            "file_object",
            json!({
                "name": "archive-2020-11-29T194442Z.tar.gz", "mode": "-rw-r--r--",
                "size": 4096, "is_file": true, "is_symlink": false,
                "mimetype": "application/tar+gzip"
            }),
        )))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let archive = client
        .files()
        .compress(SERVER, "/", &["world", "plugins"])
        .await
        .unwrap();
    assert_eq!(archive.mimetype, "application/tar+gzip");
}

// ---- Backups ----

#[tokio::test]
async fn backups_list_and_get() {
    let server = setup_mock_server().await;
    let uuid = "904df120-a66f-4375-a4ae-3eac4f7ac4b6";
    let mut body = list("backup", vec![backup_attributes(uuid, false)]);
    body["meta"]["backup_count"] = json!(1);
    authed("GET", server_route("/backups").as_str())
        .respond_with(success_response(body))
        .mount(&server)
        .await;
    authed("GET", server_route(&format!("/backups/{uuid}")).as_str())
        .respond_with(success_response(resource("backup", backup_attributes(uuid, false))))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let backups = client.backups().list(SERVER).await.unwrap();
    assert_eq!(backups.meta.as_ref().unwrap().backup_count, Some(1));
    assert_eq!(backups.len(), 1);

    let backup = client.backups().get(SERVER, uuid).await.unwrap();
    assert_eq!(backup.bytes, 8066);
    assert!(!backup.is_pending());
}

#[tokio::test]
async fn backups_create_sends_options() {
    let server = setup_mock_server().await;
    authed("POST", server_route("/backups").as_str())
        .and(body_json(json!({ "name": "nightly", "ignored": "*.log", "is_locked": true })))
        .respond_with(success_response(resource(
            "backup",
            json!({ "uuid": "new-uuid", "name": "nightly", "is_locked": true, "completed_at": null }),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = CreateBackupOptions::named("nightly").ignore(&["*.log"]).locked(true);
    let backup = client.backups().create(SERVER, &options).await.unwrap();
    assert_eq!(backup.uuid, "new-uuid");
    assert!(backup.is_pending());
}

#[tokio::test]
async fn backups_lock_restore_download_delete() {
    let server = setup_mock_server().await;
    let uuid = "904df120";
    authed("POST", server_route(&format!("/backups/{uuid}/lock")).as_str())
        .respond_with(success_response(resource("backup", backup_attributes(uuid, true))))
        .expect(1)
        .mount(&server)
        .await;
    authed("POST", server_route(&format!("/backups/{uuid}/restore")).as_str())
        .and(body_json(json!({ "truncate": true })))
        .respond_with(no_content())
        .expect(1)
        .mount(&server)
        .await;
    authed("GET", server_route(&format!("/backups/{uuid}/download")).as_str())
        .respond_with(success_response(resource(
            "signed_url",
            json!({ "url": "https://node.example.com/download/backup?token=xyz" }),
        )))
        .expect(1)
        .mount(&server)
        .await;
    authed("DELETE", server_route(&format!("/backups/{uuid}")).as_str())
        .respond_with(no_content())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let backups = client.backups();
    assert!(backups.toggle_lock(SERVER, uuid).await.unwrap().is_locked);
    backups.restore(SERVER, uuid, true).await.unwrap();
    assert!(backups
        .download_url(SERVER, uuid)
        .await
        .unwrap()
        .contains("token=xyz"));
    backups.delete(SERVER, uuid).await.unwrap();
}

#[tokio::test]
async fn backup_limit_is_panel_error() {
    let server = setup_mock_server().await;
    authed("POST", server_route("/backups").as_str())
        .respond_with(panel_error(
            400,
            "TooManyBackupsException",
            "Cannot create a new backup, this server has reached its limit of 2 backups.",
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .backups()
        .create(SERVER, &CreateBackupOptions::default())
        .await
        .unwrap_err();
    assert!(client.is_pterodactyl_error(&err));
    assert_eq!(err.as_pterodactyl().unwrap().code, "TooManyBackupsException");
}

// ---- Account ----

#[tokio::test]
async fn account_two_factor_and_updates() {
    let server = setup_mock_server().await;
    authed("GET", "/api/client/account/two-factor")
        .respond_with(success_response(json!({
            "data": { "image_url_data": "otpauth://totp/Pterodactyl:admin?secret=ABC" }
        })))
        .mount(&server)
        .await;
    authed("PUT", "/api/client/account/email")
        .and(body_json(json!({ "email": "new@example.com", "password": "hunter2" })))
        .respond_with(no_content())
        .expect(1)
        .mount(&server)
        .await;
    authed("PUT", "/api/client/account/password")
        .and(body_json(json!({
            "current_password": "hunter2",
            "password": "correct horse",
            "password_confirmation": "correct horse"
        })))
        .respond_with(no_content())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let account = client.account();
    let setup = account.two_factor_qr().await.unwrap();
    assert!(setup.image_url_data.starts_with("otpauth://"));
    account.update_email("new@example.com", "hunter2").await.unwrap();
    account
        .update_password("hunter2", "correct horse", "correct horse")
        .await
        .unwrap();

    let err = account.update_email("not-an-email", "hunter2").await.unwrap_err();
    assert!(client.is_validation_error(&err));
}

#[tokio::test]
async fn account_api_keys() {
    let server = setup_mock_server().await;
    authed("GET", "/api/client/account/api-keys")
        .respond_with(success_response(list(
            "api_key",
            vec![json!({
                "identifier": "wwQ5DJ6X1XaFznQS",
                "description": "deploy",
                "allowed_ips": [],
                "last_used_at": null,
                "created_at": "2020-06-03T15:04:47+01:00"
            })],
        )))
        .mount(&server)
        .await;
    authed("POST", "/api/client/account/api-keys")
        .and(body_json(json!({ "description": "ci", "allowed_ips": ["10.0.0.1"] })))
        .respond_with(success_response(json!({
            "object": "api_key",
            "attributes": { "identifier": "yjAZhjyVx4pXbBRn", "description": "ci", "allowed_ips": ["10.0.0.1"] },
            "meta": { "secret_token": "SECRET" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    authed("DELETE", "/api/client/account/api-keys/wwQ5DJ6X1XaFznQS")
        .respond_with(no_content())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let keys = client.account().api_keys().await.unwrap();
    assert_eq!(keys[0].description, "deploy");

    let created = client.account().create_api_key("ci", &["10.0.0.1"]).await.unwrap();
    assert_eq!(created.secret_token, "SECRET");
    assert_eq!(created.token(), "yjAZhjyVx4pXbBRnSECRET");

    client.account().delete_api_key("wwQ5DJ6X1XaFznQS").await.unwrap();
}

// ---- Identifiers in paths ----

/// Mock panel that fails verification if any request reaches it.
async fn silent_panel() -> wiremock::MockServer {
    let server = setup_mock_server().await;
    wiremock::Mock::given(wiremock::matchers::any())
        .respond_with(no_content())
        .expect(0)
        .mount(&server)
        .await;
    server
}

const MALFORMED_IDS: &[&str] = &[
    "..",
    ".",
    "../../../account/api-keys/wwQ5DJ6X1XaFznQS",
    "1a7ce997#",
    "1a7ce997?directory=/",
    "a/b",
    "a%2Fb",
];

#[tokio::test]
async fn malformed_server_ids_never_reach_the_panel() {
    let server = silent_panel().await;
    let client = client_for(&server);

    for id in MALFORMED_IDS {
        let err = client.servers().power(id, PowerSignal::Kill).await.unwrap_err();
        assert!(client.is_validation_error(&err), "power {id}: {err}");
        let err = client.files().list(id, "/").await.unwrap_err();
        assert!(client.is_validation_error(&err), "files {id}: {err}");
    }
}

#[tokio::test]
async fn malformed_backup_ids_never_reach_the_panel() {
    let server = silent_panel().await;
    let client = client_for(&server);

    for id in MALFORMED_IDS {
        let err = client.backups().delete(SERVER, id).await.unwrap_err();
        assert!(client.is_validation_error(&err), "delete {id}: {err}");
        let err = client.backups().restore(SERVER, id, true).await.unwrap_err();
        assert!(client.is_validation_error(&err), "restore {id}: {err}");
        let err = client.backups().download_url(SERVER, id).await.unwrap_err();
        assert!(client.is_validation_error(&err), "download {id}: {err}");
    }
}

#[tokio::test]
async fn malformed_api_key_ids_never_reach_the_panel() {
    let server = silent_panel().await;
    let client = client_for(&server);

    for id in MALFORMED_IDS {
        let err = client.account().delete_api_key(id).await.unwrap_err();
        assert!(client.is_validation_error(&err), "{id}: {err}");
    }
}

#[tokio::test]
async fn created_key_without_secret_is_an_error() {
    let server = setup_mock_server().await;
    authed("POST", "/api/client/account/api-keys")
        .respond_with(success_response(resource(
            "api_key",
            json!({ "identifier": "yjAZhjyVx4pXbBRn", "description": "ci", "allowed_ips": [] }),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.account().create_api_key("ci", &[]).await.unwrap_err();
    assert!(matches!(err, ptero_core::PteroError::Serialization(_)), "{err}");
    assert!(!client.is_pterodactyl_error(&err));
    assert!(!client.is_validation_error(&err));
}
