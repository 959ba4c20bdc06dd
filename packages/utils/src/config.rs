use anyhow::{bail, Context, Result};
use figment::{providers::Format, Figment};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{marker::PhantomData, path::PathBuf};

use crate::{
    credential::Credential,
    error::EvmClientError,
    evm_client::{EvmEndpoint, EvmSigningClientConfig},
};

/// The builder we use to build Config
#[derive(Debug)]
pub struct ConfigBuilder<CONFIG, ARG> {
    pub cli_env_args: ARG,
    _config: PhantomData<CONFIG>,
}

pub trait CliEnvExt: Serialize + DeserializeOwned + Default + std::fmt::Debug {
    // e.g. "TIP_ASSISTANT"
    const ENV_VAR_PREFIX: &'static str;

    // The section identifier in the TOML file, e.g. "cli"
    const TOML_IDENTIFIER: &'static str;

    // whether to print debug messages during config loading
    const PRINT_DEBUG_MSGS: bool = false;

    // an optional argument to specify the home directory
    // if not supplied, config will try a series of fallbacks
    fn home_dir(&self) -> Option<PathBuf>;

    // an optional argument to specify the dotenv file
    // if not supplied, the current working directory's .env is tried
    fn dotenv_path(&self) -> Option<PathBuf>;

    fn merge_cli_env_args(&self) -> Result<Self> {
        let env_prefix = format!("{}_", Self::ENV_VAR_PREFIX);

        let _self = Figment::new()
            .merge(figment::providers::Env::prefixed(&env_prefix))
            .merge(figment::providers::Serialized::defaults(self))
            .extract()?;

        Ok(_self)
    }

    fn env_var(name: &str) -> Option<String> {
        std::env::var(format!("{}_{name}", Self::ENV_VAR_PREFIX)).ok()
    }
}

pub trait ConfigExt: Serialize + DeserializeOwned + Default + std::fmt::Debug {
    // e.g. "tip-assistant.toml"
    const FILENAME: &'static str;

    // the directory name used for the fallback search paths, e.g. "tip-assistant"
    const DIRNAME: &'static str;

    fn log_levels(&self) -> impl Iterator<Item = &str>;

    fn tracing_env_filter(&self) -> Result<tracing_subscriber::EnvFilter> {
        let mut filter = tracing_subscriber::EnvFilter::from_default_env();
        for directive in self.log_levels() {
            match directive.parse() {
                Ok(directive) => filter = filter.add_directive(directive),
                Err(err) => bail!("{}: {}", err, directive),
            }
        }

        Ok(filter)
    }
}

impl<CONFIG: ConfigExt, ARG: CliEnvExt> ConfigBuilder<CONFIG, ARG> {
    pub fn new(cli_env_args: ARG) -> Self {
        Self {
            cli_env_args,
            _config: PhantomData,
        }
    }

    pub fn build(self) -> Result<CONFIG> {
        // try to load dotenv first, since it may affect env vars for filepaths
        let mut dotenv_paths = Vec::new();

        if let Some(dotenv_path) = self.cli_env_args.dotenv_path() {
            dotenv_paths.push(dotenv_path);
        }

        if let Some(dotenv_path) = ARG::env_var("DOTENV") {
            dotenv_paths.push(PathBuf::from(dotenv_path));
        }

        dotenv_paths.push(std::env::current_dir()?.join(".env"));

        for dotenv_path in dotenv_paths {
            if ARG::PRINT_DEBUG_MSGS {
                eprintln!("Loading env vars from {}", dotenv_path.display());
            }
            if dotenv_path.exists() {
                if let Err(e) = dotenvy::from_path(dotenv_path) {
                    bail!("Error loading dotenv file: {}", e);
                }
            }
        }

        // first merge the cli and env vars
        let cli_env_args = self.cli_env_args.merge_cli_env_args()?;

        // then get the filepath for our file-based config
        // unlike a long-running service, a missing file is fine and means "defaults only"
        let filepath =
            ConfigFilePath::new(CONFIG::FILENAME, CONFIG::DIRNAME, cli_env_args.home_dir())
                .into_path();

        let mut figment = Figment::new()
            // Start with the default values as the base
            .merge(figment::providers::Serialized::defaults(CONFIG::default()));

        match &filepath {
            Some(filepath) => {
                if ARG::PRINT_DEBUG_MSGS {
                    eprintln!("Loading config from {}", filepath.display());
                }
                figment = figment
                    // Then add default section from TOML
                    .merge(Figment::from(
                        figment::providers::Toml::file(filepath).nested(),
                    ))
                    // Then add specific section, overriding globals where needed
                    .merge(
                        Figment::from(figment::providers::Toml::file(filepath).nested())
                            .select(ARG::TOML_IDENTIFIER),
                    );
            }
            None => {
                if ARG::PRINT_DEBUG_MSGS {
                    eprintln!("No {} found, using defaults", CONFIG::FILENAME);
                }
            }
        }

        // Finally override with cli/env args
        let figment = figment.merge(figment::providers::Serialized::defaults(cli_env_args));

        figment.extract().context(format!(
            "Error extracting config (filename: {}, path: {:?})",
            CONFIG::FILENAME,
            filepath
        ))
    }
}

// a helper to try a series of fallback paths, looking for a config file
#[derive(Clone, Debug)]
pub struct ConfigFilePath {
    // the filename to look for in each directory, e.g. "tip-assistant.toml"
    pub filename: String,
    // the directory name used in the home/system fallbacks, e.g. "tip-assistant"
    pub dirname: String,
    // the optional directory set via direct args or env
    pub arg_env_dir: Option<PathBuf>,
}

impl ConfigFilePath {
    pub fn new(filename: impl ToString, dirname: impl ToString, arg_env_dir: Option<PathBuf>) -> Self {
        Self {
            filename: filename.to_string(),
            dirname: dirname.to_string(),
            arg_env_dir,
        }
    }

    pub fn into_path(self) -> Option<PathBuf> {
        self.into_possible().into_iter().find(|path| path.exists())
    }

    // tries a series of fallbacks
    pub fn into_possible(self) -> Vec<PathBuf> {
        let Self {
            filename,
            dirname,
            arg_env_dir,
        } = self;

        // the paths returned will be tried in order of pushing
        let mut dirs = Vec::new();

        // explicit, e.g. passing --home /foo to a binary, or env var {ENV_PREFIX}_HOME="/foo"
        // i.e. the path in this case will be /foo/{filename}
        if let Some(dir) = arg_env_dir {
            dirs.push(PathBuf::from(
                shellexpand::tilde(&dir.to_string_lossy()).to_string(),
            ));
        }

        // next, check the current working directory, wherever the command is run from
        if let Ok(dir) = std::env::current_dir() {
            dirs.push(dir);
        }

        // ~/.{dirname}/{filename}, e.g. ~/.tip-assistant/tip-assistant.toml
        if let Some(dir) = dirs::home_dir().map(|dir| dir.join(format!(".{dirname}"))) {
            dirs.push(dir);
        }

        // the system config directory, this will vary:
        // Linux: ~/.config/{dirname}/{filename}
        // macOS: ~/Library/Application Support/{dirname}/{filename}
        // Windows: C:\Users\MyUserName\AppData\Roaming\{dirname}\{filename}
        if let Some(dir) = dirs::config_dir().map(|dir| dir.join(&dirname)) {
            dirs.push(dir);
        }

        if let Some(dir) = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .map(|dir| dir.join(&dirname))
        {
            dirs.push(dir);
        }

        // Lastly, try /etc/{dirname}/{filename}
        dirs.push(PathBuf::from("/etc").join(&dirname));

        // now we have a list of directories to check, we need to add the filename to each
        let mut all_files: Vec<PathBuf> = dirs.into_iter().map(|dir| dir.join(&filename)).collect();

        all_files.dedup();

        all_files
    }
}

/// Connection settings for one EVM chain
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct EvmChainConfig {
    pub chain_id: u64,
    pub http_endpoint: Option<String>,
    #[serde(default)]
    pub ws_endpoints: Vec<String>,
}

impl EvmChainConfig {
    pub fn signing_client_config(
        &self,
        credential: Credential,
    ) -> std::result::Result<EvmSigningClientConfig, EvmClientError> {
        // prefer HTTP for signing clients
        let endpoint = match (self.http_endpoint.as_deref(), self.ws_endpoints.first()) {
            (Some(url), _) => url.parse::<EvmEndpoint>()?,
            (None, Some(url)) => url.parse::<EvmEndpoint>()?,
            (None, None) => {
                return Err(EvmClientError::ParseEndpoint(
                    "No endpoint provided".to_string(),
                ));
            }
        };

        Ok(EvmSigningClientConfig::new(endpoint, credential))
    }

    pub fn query_client_endpoint(&self) -> std::result::Result<EvmEndpoint, EvmClientError> {
        // prefer WS for query clients
        match (self.ws_endpoints.first(), self.http_endpoint.as_deref()) {
            (Some(url), _) => url.parse(),
            (None, Some(url)) => url.parse(),
            (None, None) => Err(EvmClientError::ParseEndpoint(
                "No endpoint provided".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use serde::{Deserialize, Serialize};

    use super::{CliEnvExt, ConfigBuilder, ConfigExt, ConfigFilePath, EvmChainConfig};
    use crate::{
        credential::Credential, evm_client::EvmEndpoint, serde::deserialize_vec_string,
    };

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct TestConfig {
        pub network: String,
        pub log_level: Vec<String>,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                network: "testnet".to_string(),
                log_level: vec!["info".to_string()],
            }
        }
    }

    impl ConfigExt for TestConfig {
        const FILENAME: &'static str = "test-config.toml";
        const DIRNAME: &'static str = "test-config";

        fn log_levels(&self) -> impl Iterator<Item = &str> {
            self.log_level.iter().map(|s| s.as_str())
        }
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    #[serde(default)]
    struct TestCliEnv {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub home: Option<PathBuf>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub dotenv: Option<PathBuf>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub network: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        #[serde(deserialize_with = "deserialize_vec_string")]
        pub log_level: Vec<String>,
    }

    impl TestCliEnv {
        fn new(home: PathBuf) -> Self {
            Self {
                // this purposefully points at a non-existing file
                // so that we don't load a real .env in tests
                dotenv: Some(home.join("does-not-exist")),
                home: Some(home),
                ..Default::default()
            }
        }
    }

    impl CliEnvExt for TestCliEnv {
        const ENV_VAR_PREFIX: &'static str = "TIP_ASSISTANT_CONFIG_TEST";
        const TOML_IDENTIFIER: &'static str = "test";

        fn home_dir(&self) -> Option<PathBuf> {
            self.home.clone()
        }

        fn dotenv_path(&self) -> Option<PathBuf> {
            self.dotenv.clone()
        }
    }

    fn write_config(dir: &tempfile::TempDir, contents: &str) {
        std::fs::write(dir.path().join(TestConfig::FILENAME), contents).unwrap();
    }

    #[test]
    fn defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config: TestConfig = ConfigBuilder::new(TestCliEnv::new(dir.path().to_path_buf()))
            .build()
            .unwrap();

        assert_eq!(config.network, "testnet");
        assert_eq!(config.log_level, vec!["info".to_string()]);
    }

    #[test]
    fn section_overrides_default_section() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            &dir,
            r#"
            [default]
            network = "mainnet"
            log_level = ["debug"]

            [test]
            log_level = ["warn"]
            "#,
        );

        let config: TestConfig = ConfigBuilder::new(TestCliEnv::new(dir.path().to_path_buf()))
            .build()
            .unwrap();

        assert_eq!(config.network, "mainnet");
        assert_eq!(config.log_level, vec!["warn".to_string()]);
    }

    #[test]
    fn env_and_args_override_file() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            &dir,
            r#"
            [default]
            network = "mainnet"
            "#,
        );

        temp_env::with_var(
            "TIP_ASSISTANT_CONFIG_TEST_LOG_LEVEL",
            Some("info,tip_assistant=debug"),
            || {
                let config: TestConfig =
                    ConfigBuilder::new(TestCliEnv::new(dir.path().to_path_buf()))
                        .build()
                        .unwrap();
                assert_eq!(config.network, "mainnet");
                assert_eq!(
                    config.log_level,
                    vec!["info".to_string(), "tip_assistant=debug".to_string()]
                );

                let mut args = TestCliEnv::new(dir.path().to_path_buf());
                args.network = Some("testnet".to_string());
                let config: TestConfig = ConfigBuilder::new(args).build().unwrap();
                assert_eq!(config.network, "testnet");
            },
        );
    }

    #[test]
    fn tracing_filter_rejects_bad_directive() {
        let config = TestConfig {
            log_level: vec!["info".to_string(), "tip_assistant=loud".to_string()],
            ..Default::default()
        };
        assert!(config.tracing_env_filter().is_err());
    }

    #[test]
    fn config_file_fallbacks_start_with_explicit_dir() {
        let possible =
            ConfigFilePath::new("foo.toml", "foo", Some(PathBuf::from("/tmp/explicit")))
                .into_possible();

        assert_eq!(possible[0], PathBuf::from("/tmp/explicit/foo.toml"));
        assert_eq!(possible.last(), Some(&PathBuf::from("/etc/foo/foo.toml")));
    }

    #[test]
    fn chain_config_endpoint_preferences() {
        let chain = EvmChainConfig {
            chain_id: 42,
            http_endpoint: Some("https://rpc.mainnet.lukso.network".to_string()),
            ws_endpoints: vec!["wss://ws-rpc.mainnet.lukso.network".to_string()],
        };

        assert!(matches!(
            chain.query_client_endpoint().unwrap(),
            EvmEndpoint::WebSocket(_)
        ));
        let signing = chain
            .signing_client_config(Credential::new("0x01".to_string()))
            .unwrap();
        assert!(matches!(signing.endpoint, EvmEndpoint::Http(_)));

        let empty = EvmChainConfig::default();
        assert!(empty.query_client_endpoint().is_err());
    }
}
