use readyr_common::config::Config;
use readyr_common::env::{self, ServiceEndpoint};
use readyr_common::outcome::PollOutcome;

use super::PollArgs;
use super::wait::{self, Labelled};
use crate::terminal::{format, print};

pub async fn stack(poll: PollArgs, cfg: &Config) -> anyhow::Result<PollOutcome> {
    let services: Vec<ServiceEndpoint> = env::stack_endpoints(env::process_env)?;

    if cfg.quiet == 0 {
        for (idx, service) in services.iter().enumerate() {
            print::tree_head(idx, service.name);
            print::as_tree_one_level(format::endpoint_to_details(&service.endpoint));
        }
        print::header("polling", cfg.quiet);
    }

    let targets: Vec<Labelled> = services
        .into_iter()
        .map(|service| Labelled {
            label: service.name.to_string(),
            endpoint: service.endpoint,
        })
        .collect();

    wait::run(&targets, &poll, cfg).await
}
