//! Metacommand header: the `%dhrender;` signature followed by `%dim` and
//! `%shade` in any order, each at most once.

use crate::error::{ErrorKind, ScriptResult};
use crate::model::{MAX_DIM, ScriptConfig, ShadingMode};

use super::lexer::{Entity, EntitySource};
use super::literal::parse_int;

const SIGNATURE: &str = "dhrender";

/// Parse the header and return it along with the first entity after it.
///
/// The returned entity has already been consumed from `src`; the
/// counting scan starts from it.
pub fn parse_header<S: EntitySource>(src: &mut S) -> ScriptResult<(ScriptConfig, Entity)> {
    read_signature(src)?;

    let mut dims: Option<(i32, i32)> = None;
    let mut shading: Option<ShadingMode> = None;

    let mut ent = src.read()?;
    while ent == Entity::BeginMeta {
        let cmd = match src.read()? {
            Entity::MetaToken(cmd) => cmd,
            _ => return Err(ErrorKind::InvalidHeaderCommand.at(src.line())),
        };

        match cmd.as_str() {
            "dim" => {
                if dims.is_some() {
                    return Err(ErrorKind::HeaderRepeated.at(src.line()));
                }
                let width = read_dimension(src)?;
                let height = read_dimension(src)?;
                dims = Some((width, height));
            }
            "shade" => {
                if shading.is_some() {
                    return Err(ErrorKind::HeaderRepeated.at(src.line()));
                }
                shading = Some(read_shading(src)?);
            }
            _ => return Err(ErrorKind::InvalidHeaderCommand.at(src.line())),
        }

        if src.read()? != Entity::EndMeta {
            return Err(ErrorKind::InvalidHeaderCommand.at(src.line()));
        }
        ent = src.read()?;
    }

    let (width, height) = dims.ok_or(ErrorKind::DimensionsNotDeclared.at(0))?;
    let shading = shading.ok_or(ErrorKind::ShadingModeNotDeclared.at(0))?;

    Ok((
        ScriptConfig {
            width,
            height,
            shading,
        },
        ent,
    ))
}

/// Anything other than `%dhrender;` up front, stream errors included,
/// means the input is not a scene script at all.
fn read_signature<S: EntitySource>(src: &mut S) -> ScriptResult<()> {
    let expected = [
        Entity::BeginMeta,
        Entity::MetaToken(SIGNATURE.into()),
        Entity::EndMeta,
    ];
    for want in expected {
        if src.next_entity().ok() != Some(want) {
            return Err(ErrorKind::NoSignature.at(0));
        }
    }
    Ok(())
}

fn read_dimension<S: EntitySource>(src: &mut S) -> ScriptResult<i32> {
    let token = match src.read()? {
        Entity::MetaToken(token) => token,
        _ => return Err(ErrorKind::HeaderSyntax.at(src.line())),
    };
    let value = parse_int(&token).map_err(|_| ErrorKind::HeaderSyntax.at(src.line()))?;
    if !(1..=MAX_DIM).contains(&value) {
        return Err(ErrorKind::DimensionOutOfRange.at(src.line()));
    }
    Ok(value)
}

fn read_shading<S: EntitySource>(src: &mut S) -> ScriptResult<ShadingMode> {
    let token = match src.read()? {
        Entity::MetaToken(token) => token,
        _ => return Err(ErrorKind::HeaderSyntax.at(src.line())),
    };
    match token.as_str() {
        "vertex" => Ok(ShadingMode::Interpolated),
        "triangle" => Ok(ShadingMode::Flat),
        _ => Err(ErrorKind::UnrecognizedShadingMode.at(src.line())),
    }
}
