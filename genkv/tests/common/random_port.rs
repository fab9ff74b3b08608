use lazy_static::lazy_static;

use std::sync::Mutex;

const STARTING_PORT: u16 = 17000;
pub struct PseudoRandomGenkvdPort {
    port: u16,
}

impl PseudoRandomGenkvdPort {
    pub fn new() -> PseudoRandomGenkvdPort {
        PseudoRandomGenkvdPort {
            port: STARTING_PORT,
        }
    }

    pub fn get_next_port(&mut self) -> u16 {
        self.port += 10;
        self.port
    }
}

lazy_static! {
    pub static ref PSEUDO_RANDOM_PORT: Mutex<PseudoRandomGenkvdPort> =
        Mutex::new(PseudoRandomGenkvdPort::new());
}
