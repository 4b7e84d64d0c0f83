//! Calc command - one allocation from the command line

use crate::cache::{ExpiryPolicy, ResultCache};
use crate::cli::args::CalcArgs;
use crate::cli::output::print_allocation;
use crate::config::Config;
use crate::error::RackResult;
use crate::plate::PlateCounts;
use crate::service::{RackRequest, RackService};
use tracing::debug;

/// Execute the calc command
pub async fn execute(args: CalcArgs, config: &Config) -> RackResult<()> {
    // Nothing outlives this process, so the cache never needs to expire
    let service = RackService::new(ResultCache::new(None, ExpiryPolicy::Timer), config.defaults);

    let allocation = if args.bar.is_none() && args.plates.is_empty() {
        service.rack_default(args.weight).await?
    } else {
        let plates = if args.plates.is_empty() {
            config.defaults.plates
        } else {
            args.plates.iter().copied().collect::<PlateCounts>()
        };
        let request = RackRequest::new(args.bar.unwrap_or(0), args.weight, plates);
        debug!("Calculating with {:?}", request);
        service.rack(request).await?
    };

    print_allocation(&allocation, args.format)
}
