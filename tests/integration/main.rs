mod cli_test;
mod synthesis_props;
