//! Audio outputs, as listed by the `outputs` command.

use super::{flag, number, Field, Record};

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Output {
    pub id: u32,
    pub name: String,
    /// Name of the output plugin, like `alsa` or `httpd`.
    pub plugin: Option<String>,
    pub enabled: bool,
}

impl Record for Output {
    const BEGIN: &'static [&'static str] = &["outputid"];

    const FIELDS: &'static [Field<Self>] = &[
        ("outputid", |output, v| {
            output.id = number(v)?;
            Ok(())
        }),
        ("outputname", |output, v| {
            output.name = v.to_owned();
            Ok(())
        }),
        ("plugin", |output, v| {
            output.plugin = Some(v.to_owned());
            Ok(())
        }),
        ("outputenabled", |output, v| {
            output.enabled = flag(v)?;
            Ok(())
        }),
    ];
}
