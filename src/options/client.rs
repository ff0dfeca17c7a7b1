use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::net::RetryPolicy;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Network", inline)]
#[serde(default)]
/// Endpoints, retry ceiling and per-attempt timeout for remote requests.
pub struct ClientOptions {
    /// UniProt REST base URL.
    #[schemars(title = "UniProt URL")]
    pub uniprot_base_url: String,
    /// AlphaFold DB base URL.
    #[schemars(title = "AlphaFold URL")]
    pub alphafold_base_url: String,
    /// AlphaFold model version used in structure file names.
    #[schemars(title = "Model Version", range(min = 1, max = 10))]
    pub model_version: u32,
    /// Maximum number of search hits requested.
    #[schemars(title = "Search Results", range(min = 1, max = 500))]
    pub search_page_size: u32,
    /// Maximum attempts per request, including the first.
    #[schemars(title = "Max Attempts", range(min = 1, max = 10))]
    pub max_attempts: u32,
    /// Backoff base delay in milliseconds.
    #[schemars(title = "Retry Delay (ms)", range(min = 0, max = 60000))]
    pub base_delay_ms: u64,
    /// Per-attempt timeout in milliseconds.
    #[schemars(title = "Timeout (ms)", range(min = 1000, max = 300_000))]
    pub timeout_ms: u64,
    /// `User-Agent` header value.
    #[schemars(skip)]
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            uniprot_base_url: "https://rest.uniprot.org".to_owned(),
            alphafold_base_url: "https://alphafold.ebi.ac.uk".to_owned(),
            model_version: 4,
            search_page_size: 10,
            max_attempts: 3,
            base_delay_ms: 1000,
            timeout_ms: 30_000,
            user_agent: concat!("foldscope/", env!("CARGO_PKG_VERSION"))
                .to_owned(),
        }
    }
}

impl ClientOptions {
    /// Retry policy derived from these options.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::from_millis(self.base_delay_ms),
        }
    }

    /// Deadline applied to each individual attempt.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// UniProtKB search endpoint.
    #[must_use]
    pub fn search_url(&self) -> String {
        format!(
            "{}/uniprotkb/search",
            self.uniprot_base_url.trim_end_matches('/')
        )
    }

    /// AlphaFold PDB-format model URL for a validated accession.
    #[must_use]
    pub fn structure_url(&self, accession: &str) -> String {
        format!(
            "{}/files/AF-{accession}-F1-model_v{}.pdb",
            self.alphafold_base_url.trim_end_matches('/'),
            self.model_version
        )
    }

    /// AlphaFold prediction metadata URL for a validated accession.
    #[must_use]
    pub fn metadata_url(&self, accession: &str) -> String {
        format!(
            "{}/api/prediction/{accession}",
            self.alphafold_base_url.trim_end_matches('/')
        )
    }
}
