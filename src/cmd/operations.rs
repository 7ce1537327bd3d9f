use crate::reports;
use clap::Args;
use keysuggest::Modality;

#[derive(Args, Debug, Clone)]
pub struct OperationsArgs {
    /// Only show operations enabled for this modality.
    #[arg(short, long)]
    pub modality: Option<Modality>,
}

pub fn run(args: OperationsArgs) {
    reports::print_operation_table(args.modality);
}
