use crate::commands::{CliError, PathCmd, PointsCmd, TessellateCmd};
use lyon_brace::math::Point;
use lyon_brace::svg::path_data;
use lyon_brace::tessellation::VertexBuffers;
use lyon_brace::{curly_brace, BraceGeometry, Verb};

pub fn points(mut cmd: PointsCmd) -> Result<(), CliError> {
    let brace = BraceGeometry::new(&cmd.params);
    for (p, verb) in brace.commands() {
        let verb = match verb {
            Verb::Begin => "begin",
            Verb::Cubic => "cubic",
        };
        writeln!(&mut *cmd.output, "{} {} {}", verb, p.x, p.y)?;
    }

    Ok(())
}

pub fn path(mut cmd: PathCmd) -> Result<(), CliError> {
    let patch = curly_brace(&cmd.params, &cmd.style);
    writeln!(&mut *cmd.output, "{}", path_data(patch.path().iter()))?;

    Ok(())
}

pub fn tessellate(mut cmd: TessellateCmd) -> Result<(), CliError> {
    let patch = curly_brace(&cmd.params, &cmd.style);

    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    let count = patch.tessellate_stroke(&mut buffers)?;

    if cmd.count {
        writeln!(&mut *cmd.output, "vertices: {}", count.vertices)?;
        writeln!(&mut *cmd.output, "indices: {}", count.indices)?;
        return Ok(());
    }

    write!(&mut *cmd.output, "vertices: [")?;
    for (i, v) in buffers.vertices.iter().enumerate() {
        let sep = if i == 0 { "" } else { ", " };
        write!(&mut *cmd.output, "{}({}, {})", sep, v.x, v.y)?;
    }
    writeln!(&mut *cmd.output, "]")?;
    writeln!(&mut *cmd.output, "indices: {:?}", buffers.indices)?;

    Ok(())
}
