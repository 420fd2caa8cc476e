use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use cookiechain_core::contract::ContractAbi;
use log::info;

#[derive(Debug, Parser)]
pub struct Functions {
    /// Path to the contract ABI or artifact JSON file.
    #[clap(long, env = "COOKIECHAIN_ABI")]
    #[clap(default_value = "./build/cookie_chain.json")]
    abi: PathBuf,
}

impl Functions {
    pub fn run(self) -> Result<()> {
        let abi = ContractAbi::load(&self.abi)?;

        for signature in view_signatures(&abi) {
            info!("{signature}");
        }

        Ok(())
    }
}

/// Renders `name(input: type, ...) -> (output, ...)` for every read-only function.
fn view_signatures(abi: &ContractAbi) -> Vec<String> {
    abi.functions()
        .filter(|function| function.is_view())
        .map(|function| {
            let inputs = function
                .inputs
                .iter()
                .map(|input| format!("{}: {}", input.name, input.ty))
                .collect::<Vec<_>>()
                .join(", ");
            let outputs = function
                .outputs
                .iter()
                .map(|output| output.ty.as_str())
                .collect::<Vec<_>>()
                .join(", ");

            format!("{}({}) -> ({})", function.name, inputs, outputs)
        })
        .collect()
}
