// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use octofit_api::Client;
use octofit_app::{LoadId, Record, ResourceKind};
use octofit_tui::{AppRuntime, InternalEvent};
use std::sync::mpsc::Sender;
use std::thread;

/// Loads collections from the REST API. Each load runs on its own thread so
/// the UI keeps drawing while a request is in flight.
pub struct ApiRuntime {
    client: Client,
}

impl ApiRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl AppRuntime for ApiRuntime {
    fn load_collection(
        &mut self,
        load_id: LoadId,
        kind: ResourceKind,
    ) -> std::result::Result<Vec<Record>, String> {
        self.client
            .load(load_id, kind)
            .map_err(|error| error.to_string())
    }

    fn spawn_load(
        &mut self,
        load_id: LoadId,
        kind: ResourceKind,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let client = self.client.clone();
        thread::Builder::new()
            .name(format!("load-{}", kind.path_segment()))
            .spawn(move || {
                let outcome = client
                    .load(load_id, kind)
                    .map_err(|error| error.to_string());
                let _ = tx.send(InternalEvent::LoadFinished {
                    load_id,
                    kind,
                    outcome,
                });
            })
            .with_context(|| format!("spawn load thread for {}", kind.path_segment()))?;
        Ok(())
    }
}

/// Serves the bundled sample collections without touching the network.
#[derive(Debug, Default)]
pub struct DemoRuntime;

impl AppRuntime for DemoRuntime {
    fn load_collection(
        &mut self,
        load_id: LoadId,
        kind: ResourceKind,
    ) -> std::result::Result<Vec<Record>, String> {
        tracing::debug!(resource = kind.path_segment(), load_id, "serving demo data");
        Ok(octofit_testkit::sample_records(kind))
    }
}
