//! End-to-end reconciliation against a real directory and a local HTTP server

use anyhow::Result;
use mockito::Server;
use packsync_lib::application::apply_plan;
use packsync_lib::display::{Display, StyleManager};
use packsync_lib::networking::{FetchError, HttpContentFetcher, NetworkingConfig};
use packsync_lib::plan::{UpdateFile, UpdatePlan};
use packsync_lib::reconcile::{LiveFileMutator, ReconcileError, Reconciler};
use packsync_tests::{TestEnvironment, override_file, plan_from_json};
use serde_json::json;

fn http_reconciler() -> Result<Reconciler<LiveFileMutator, HttpContentFetcher>> {
    let client = NetworkingConfig::default().with_timeout(5).build_client()?;
    Ok(Reconciler::new(
        LiveFileMutator::new(),
        HttpContentFetcher::new(client),
    ))
}

#[tokio::test]
async fn e2e_full_plan_over_http() -> Result<()> {
    let mut server = Server::new_async().await;
    let add = server
        .mock("GET", "/files/a.jar")
        .with_status(200)
        .with_body("a-bytes")
        .create_async()
        .await;
    let replace = server
        .mock("GET", "/files/b-2.jar")
        .with_status(200)
        .with_body("b2-bytes")
        .create_async()
        .await;

    let env = TestEnvironment::new()?.with_mods(&["b-1.jar", "c.jar", "d.jar"])?;

    let plan = plan_from_json(json!({
        "overridesTotal": 2,
        "overrides": [
            { "key": "overrides/config/x.cfg", "content": "a2V5PTE=", "isFile": true },
            { "key": "overrides/README", "content": "read me", "isFile": true }
        ],
        "newAddons": [
            { "name": "A", "filename": "a.jar", "downloadUrl": format!("{}/files/a.jar", server.url()) }
        ],
        "changedAddons": [
            {
                "name": "B",
                "filename": "b-2.jar",
                "oldFilename": "b-1.jar",
                "downloadUrl": format!("{}/files/b-2.jar", server.url())
            }
        ],
        "disabledAddons": [{ "filename": "c.jar" }],
        "removedAddons": [{ "filename": "d.jar" }]
    }))?;
    assert_eq!(plan.total(), 6);

    let reconciler = http_reconciler()?;
    let mut seen = Vec::new();
    let report = reconciler
        .apply(plan, env.instance_root(), &mut |p: f64| seen.push(p))
        .await?;

    add.assert_async().await;
    replace.assert_async().await;

    assert_eq!(env.mod_names()?, vec!["a.jar", "b-2.jar", "c.jar.disabled"]);
    assert_eq!(env.instance.read_mod("a.jar").map_err(|e| anyhow::anyhow!("{e}"))?, "a-bytes");
    assert_eq!(
        env.instance.read_file("config/x.cfg").map_err(|e| anyhow::anyhow!("{e}"))?,
        "key=1"
    );
    assert_eq!(
        env.instance.read_file("README").map_err(|e| anyhow::anyhow!("{e}"))?,
        "read me"
    );

    assert_eq!(seen.len(), 6);
    assert!(seen.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(seen.last().copied(), Some(100.0));
    assert!(report.is_complete());
    assert!(report.recoverable.is_empty());

    Ok(())
}

#[tokio::test]
async fn e2e_http_error_aborts_before_later_phases() -> Result<()> {
    let mut server = Server::new_async().await;
    let _broken = server
        .mock("GET", "/files/a.jar")
        .with_status(500)
        .create_async()
        .await;

    let env = TestEnvironment::new()?.with_mods(&["c.jar"])?;

    let plan = UpdatePlan {
        new_addons: vec![
            UpdateFile::new("a.jar").with_download_url(format!("{}/files/a.jar", server.url())),
        ],
        disabled_addons: vec![UpdateFile::new("c.jar")],
        overrides: vec![override_file("options.txt", "b3B0aW9ucw==")],
        overrides_total: 1,
        ..UpdatePlan::default()
    };

    let err = http_reconciler()?
        .apply(plan, env.instance_root(), &mut |_: f64| {})
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ReconcileError::AddFailed {
            source: FetchError::Status { status: 500, .. },
            ..
        }
    ));
    assert_eq!(env.mod_names()?, vec!["c.jar"]);
    assert!(!env.instance.file_exists("options.txt"));

    Ok(())
}

#[tokio::test]
async fn e2e_yaml_plan_through_apply_plan() -> Result<()> {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/files/new.jar")
        .with_status(200)
        .with_body("new")
        .create_async()
        .await;

    let env = TestEnvironment::new()?.with_mods(&["gone.jar"])?;
    let plan_path = env.write_plan(
        "plan.yml",
        &format!(
            "overridesTotal: 0\n\
             newAddons:\n  - filename: new.jar\n    downloadUrl: {}/files/new.jar\n\
             removedAddons:\n  - filename: gone.jar\n",
            server.url()
        ),
    )?;

    let plan = UpdatePlan::load(&plan_path)?;
    let display = Display::with_styling(StyleManager::plain());
    let report = apply_plan(&http_reconciler()?, plan, env.instance_root(), &display).await?;

    assert_eq!(report.completed, 2);
    assert_eq!(env.mod_names()?, vec!["new.jar"]);

    Ok(())
}
