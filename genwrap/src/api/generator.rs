use std::{collections::HashSet, path::PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    api::{
        config::GeneratorConfig,
        destination::Destination,
        formatter::Formatter,
        header::Header,
        record::EnumDecl,
    },
    codegen::Emitter,
    naming::to_pascal_case,
    GenError, Result,
};

/// One generation run: read the headers, emit all blocks, write and format the output.
///
/// # Example
///
/// ```no_run
/// use genwrap::{GeneratorConfig, Generator};
///
/// let config = GeneratorConfig::builder("/usr/include/proton")
///     .output("src/wrappers_gen.rs")
///     .build();
/// let path = Generator::new(config).generate().unwrap();
/// println!("wrote {}", path.display());
/// ```
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Emit every block in output order without touching the filesystem beyond the headers.
    ///
    /// Shared-header enums come first, then the event kinds, then per API its enums and its
    /// wrapper. An enum already emitted (including the event enum) is not emitted again.
    pub fn render(&self) -> Result<Destination> {
        let config = &self.config;
        let emitter = Emitter::new(config);
        let mut destination = Destination::new().with_license(config.license());
        let mut emitted = HashSet::from([to_pascal_case(config.event_enum())]);

        for module in config.shared_headers() {
            let header = Header::read(config.include_dir(), module)?;
            self.emit_enums(&emitter, &header, &mut emitted, &mut destination)?;
        }

        let events = Header::read(config.include_dir(), config.event_header())?;
        let event_enum = events
            .enums(config)
            .into_iter()
            .find(|decl| decl.name == config.event_enum())
            .ok_or_else(|| GenError::MissingEnum {
                header: config.event_header().to_string(),
                name: format!("{}{}", config.prefix(), config.event_enum()),
            })?;
        destination.extend(emitter.event_kind_block(&event_enum)?);

        for api in config.apis() {
            info!(api = %api, "generating wrapper");
            let header = Header::read(config.include_dir(), api)?;
            self.emit_enums(&emitter, &header, &mut emitted, &mut destination)?;
            let functions = header.functions(api, config);
            destination.extend(emitter.wrapper_block(api, &functions)?);
        }
        Ok(destination)
    }

    fn emit_enums(
        &self,
        emitter: &Emitter,
        header: &Header,
        emitted: &mut HashSet<String>,
        destination: &mut Destination,
    ) -> Result<()> {
        for decl in header.enums(&self.config) {
            if is_new(emitted, &decl) {
                destination.extend(emitter.enum_block(&decl)?);
            } else {
                debug!(header = %header.module(), enum_name = %decl.name, "enum already emitted");
            }
        }
        Ok(())
    }

    /// Render, write the output file and run the formatter.
    ///
    /// Nothing is written if any declaration fails to map. A formatter failure leaves the
    /// written file in place.
    #[instrument(level = "debug", skip_all, fields(include_dir = %self.config.include_dir().display()))]
    pub fn generate(&self) -> Result<PathBuf> {
        let destination = self.render()?;
        let path = destination.write(self.config.output())?;
        info!(path = %path.display(), items = destination.items().len(), "wrote wrappers");
        if let Some(formatter) = Formatter::from_config(&self.config) {
            formatter.run(&path)?;
        }
        Ok(path)
    }
}

fn is_new(emitted: &mut HashSet<String>, decl: &EnumDecl) -> bool {
    emitted.insert(to_pascal_case(&decl.name))
}
