/*!

  Code memory is a flat stream of `Operand`s. An instruction is not a record: it is a `Code`
  operand followed inline by as many operands as its `Operation` consumes, and the evaluator
  fetches those one at a time. The assembler emits one operand per source token, so the
  position of a token in the source (skipping label lines) is its position in the stream, which
  is what makes label positions computable before the stream exists.

  An operand is a tag and a `Word`. Decoding the payload into an `Operation` or a `Register`
  can fail, and callers decide what failure means: the evaluator treats an undecodable opcode
  as a no-op and an undecodable register as a recoverable diagnostic.

*/

mod assembly;
mod operand;
mod operation;

pub use assembly::{assemble, Assembler, Program};
pub use operand::{Operand, Word, UNRESOLVED};
pub use operation::{Group, OperandKind, Operation};
