use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn envsubst_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("envsubst"));
	cmd.env("NO_COLOR", "1").env_remove("ENVSUBST_LOG");
	cmd
}
