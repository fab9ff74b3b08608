use bytes::Bytes;
use thiserror::Error;

pub type KeyType = Bytes;
pub type ValueType = Bytes;

const LINE_SEPARATOR: u8 = b'\n';
const TOKEN_SEPARATOR: u8 = b' ';

/// Client request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Ping,
    Get { key: KeyType },
    Set { key: KeyType, value: ValueType },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid command")]
    InvalidLine,
    #[error("{expected}")]
    WrongArity { expected: usize },
    #[error("unknown command {0:?}")]
    Unknown(Bytes),
}

impl Command {
    /// Parses a single line, without its terminator.
    pub fn parse(line: Bytes) -> Result<Command, ParseError> {
        if line.contains(&LINE_SEPARATOR) {
            return Err(ParseError::InvalidLine);
        }

        let tokens: Vec<Bytes> = line
            .split(|byte| *byte == TOKEN_SEPARATOR)
            .map(|token| line.slice_ref(token))
            .collect();

        match &tokens[0][..] {
            b"PING" => {
                Command::check_arity(&tokens, 1)?;
                Ok(Command::Ping)
            }
            b"GET" => {
                Command::check_arity(&tokens, 2)?;
                Ok(Command::Get {
                    key: tokens[1].clone(),
                })
            }
            b"SET" => {
                Command::check_arity(&tokens, 3)?;
                Ok(Command::Set {
                    key: tokens[1].clone(),
                    value: tokens[2].clone(),
                })
            }
            _ => Err(ParseError::Unknown(tokens[0].clone())),
        }
    }

    fn check_arity(tokens: &[Bytes], expected: usize) -> Result<(), ParseError> {
        if tokens.len() != expected {
            return Err(ParseError::WrongArity { expected });
        }
        Ok(())
    }
}
