//! Sharing one bus between several device handles

use core::cell::RefCell;

use crate::address::DeviceAddress;
use crate::transport::BusTransport;

/// Borrowing handle onto a bus owned by a `RefCell`
///
/// Each device gets its own `SharedTransport`; the bus is only borrowed for
/// the duration of a single transport call. Device operations run to
/// completion before returning, so on one thread two handles never
/// interleave inside a transaction. `RefCell` is `!Sync`, which keeps the
/// handles on that thread.
pub struct SharedTransport<'a, T> {
    bus: &'a RefCell<T>,
}

impl<'a, T> SharedTransport<'a, T> {
    /// Create a handle onto `bus`
    pub fn new(bus: &'a RefCell<T>) -> Self {
        Self { bus }
    }
}

impl<T: BusTransport> BusTransport for SharedTransport<'_, T> {
    type Error = T::Error;

    fn begin_transaction(&mut self, address: DeviceAddress) -> Result<(), Self::Error> {
        self.bus.borrow_mut().begin_transaction(address)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.bus.borrow_mut().write_byte(byte)
    }

    fn end_transaction(&mut self, send_stop: bool) -> Result<(), Self::Error> {
        self.bus.borrow_mut().end_transaction(send_stop)
    }

    fn request_bytes(
        &mut self,
        address: DeviceAddress,
        count: usize,
        send_stop: bool,
    ) -> Result<usize, Self::Error> {
        self.bus.borrow_mut().request_bytes(address, count, send_stop)
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        self.bus.borrow_mut().read_byte()
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.borrow_mut().write_bytes(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{BusEvent, MockTransport};

    #[test]
    fn test_two_handles_one_bus() {
        let bus = RefCell::new(MockTransport::new());
        let a = DeviceAddress::new(0x10).unwrap();
        let b = DeviceAddress::new(0x20).unwrap();

        let mut first = SharedTransport::new(&bus);
        let mut second = SharedTransport::new(&bus);

        first.begin_transaction(a).unwrap();
        first.write_byte(0x01).unwrap();
        first.end_transaction(true).unwrap();

        second.begin_transaction(b).unwrap();
        second.write_byte(0x02).unwrap();
        second.end_transaction(true).unwrap();

        let events = bus.borrow().events().to_vec();
        assert_eq!(
            events,
            std::vec![
                BusEvent::Begin(a),
                BusEvent::Write(0x01),
                BusEvent::End { send_stop: true },
                BusEvent::Begin(b),
                BusEvent::Write(0x02),
                BusEvent::End { send_stop: true },
            ]
        );
    }
}
