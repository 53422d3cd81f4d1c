//! Register device behaviour against a scripted bus

use core::cell::RefCell;

use proptest::prelude::*;
use regwire_core::{
    ConfigError, ContractViolation, Cursor, DeviceAddress, DeviceConfig, Endianness, Error,
    RegisterDevice, ValueKind, Word,
};
use regwire_hal::mock::{BusEvent, MockError, MockTransport};
use regwire_hal::SharedTransport;

const MSB: Endianness = Endianness::MostSignificantFirst;
const LSB: Endianness = Endianness::LeastSignificantFirst;

fn addr() -> DeviceAddress {
    DeviceAddress::new(0x68).unwrap()
}

fn device(bus: &mut MockTransport, endianness: Endianness) -> RegisterDevice<&mut MockTransport> {
    RegisterDevice::new(bus, addr(), endianness).unwrap()
}

/// Events of one `begin_sequential_read(reg, n)` that succeeded
fn read_events(reg: u8, bytes: &[u8]) -> Vec<BusEvent> {
    let mut events = vec![
        BusEvent::Begin(addr()),
        BusEvent::Write(reg),
        BusEvent::End { send_stop: false },
        BusEvent::Request {
            address: addr(),
            count: bytes.len(),
            send_stop: true,
        },
    ];
    events.extend(bytes.iter().map(|&b| BusEvent::Read(b)));
    events
}

#[test]
fn test_write_framing_msb_first() {
    let mut bus = MockTransport::new();
    let mut dev = device(&mut bus, MSB);

    dev.write(0x1B, 0x0A0B_0C0Du32).unwrap();

    assert_eq!(
        bus.events(),
        &[
            BusEvent::Begin(addr()),
            BusEvent::Write(0x1B),
            BusEvent::Write(0x0A),
            BusEvent::Write(0x0B),
            BusEvent::Write(0x0C),
            BusEvent::Write(0x0D),
            BusEvent::End { send_stop: true },
        ]
    );
}

#[test]
fn test_write_framing_lsb_first_signed() {
    let mut bus = MockTransport::new();
    let mut dev = device(&mut bus, LSB);

    dev.write(0x20, -2i16).unwrap();
    assert_eq!(bus.written(), vec![0x20, 0xFE, 0xFF]);
}

#[test]
fn test_write_each_width_sends_one_plus_size_bytes() {
    let mut bus = MockTransport::new();
    let mut dev = device(&mut bus, LSB);

    dev.write(0x01, 0u8).unwrap();
    dev.write(0x02, 0u16).unwrap();
    dev.write(0x03, 0i32).unwrap();
    dev.write(0x04, 0u64).unwrap();

    assert_eq!(bus.written().len(), 2 + 3 + 5 + 9);
    let stops = bus
        .events()
        .iter()
        .filter(|e| **e == BusEvent::End { send_stop: true })
        .count();
    assert_eq!(stops, 4);
}

#[test]
fn test_single_read_transaction_shape() {
    let mut bus = MockTransport::new();
    bus.queue_response(&[0x12, 0x34]);
    let mut dev = device(&mut bus, MSB);

    assert_eq!(dev.read::<u16>(0x3B), Ok(0x1234));
    assert_eq!(bus.events(), read_events(0x3B, &[0x12, 0x34]).as_slice());
}

#[test]
fn test_single_read_matches_sequential_read() {
    let response = [0xFF, 0xFF, 0xFE, 0x0C];

    let mut bus = MockTransport::new();
    bus.queue_response(&response);
    let single = device(&mut bus, MSB).read::<i32>(0x10).unwrap();
    let single_events = bus.events().to_vec();

    let mut bus = MockTransport::new();
    bus.queue_response(&response);
    let mut dev = device(&mut bus, MSB);
    dev.begin_sequential_read(0x10, 4).unwrap();
    let sequential = dev.decode::<i32>().unwrap();

    assert_eq!(single, -500);
    assert_eq!(single, sequential);
    assert_eq!(single_events, bus.events());
}

#[test]
fn test_sequential_decode_composition() {
    let mut bus = MockTransport::new();
    bus.queue_response(&[0x11, 0x22, 0x33, 0x44]);
    let mut dev = device(&mut bus, LSB);

    dev.begin_sequential_read(0x28, 4).unwrap();
    assert_eq!(dev.cursor(), Cursor::window(4));
    assert_eq!(dev.decode::<u16>(), Ok(0x2211));
    assert_eq!(dev.remaining(), 2);
    assert_eq!(dev.decode::<u16>(), Ok(0x4433));

    // Wrapped, not parked at the end
    assert_eq!(dev.cursor().index(), 0);
    assert_eq!(dev.cursor().len(), 4);
}

#[test]
fn test_wrapped_window_decodes_again_without_bus_traffic() {
    let mut bus = MockTransport::new();
    bus.queue_response(&[0x01, 0x02, 0x03, 0x04]);
    let mut dev = device(&mut bus, MSB);

    dev.begin_sequential_read(0x00, 4).unwrap();
    assert_eq!(dev.decode::<u32>(), Ok(0x0102_0304));
    assert_eq!(dev.decode::<u32>(), Ok(0x0102_0304));
    assert_eq!(dev.decode::<u8>(), Ok(0x01));

    assert_eq!(bus.events().len(), read_events(0x00, &[0; 4]).len());
}

#[test]
fn test_mixed_widths_in_one_window() {
    let mut bus = MockTransport::new();
    bus.queue_response(&[0x80, 0x00, 0x01, 0xFF, 0x7F]);
    let mut dev = device(&mut bus, MSB);

    dev.begin_sequential_read(0x40, 5).unwrap();
    assert_eq!(dev.decode::<i16>(), Ok(i16::MIN));
    assert_eq!(dev.decode::<u8>(), Ok(0x01));
    assert_eq!(dev.decode::<i16>(), Ok(-129));
}

#[test]
fn test_decode_past_window_is_contract_violation() {
    let mut bus = MockTransport::new();
    bus.queue_response(&[0xAA, 0xBB, 0xCC]);
    let mut dev = device(&mut bus, LSB);

    dev.begin_sequential_read(0x00, 3).unwrap();
    dev.decode::<u16>().unwrap();
    assert_eq!(
        dev.decode::<u16>(),
        Err(Error::Contract(ContractViolation::DecodeOverrun {
            requested: 2,
            remaining: 1
        }))
    );
    // Failed decode consumed nothing
    assert_eq!(dev.decode::<u8>(), Ok(0xCC));
}

#[test]
fn test_decode_before_any_read_fails() {
    let mut bus = MockTransport::new();
    let mut dev = device(&mut bus, LSB);

    assert_eq!(
        dev.decode::<u8>(),
        Err(Error::Contract(ContractViolation::DecodeOverrun {
            requested: 1,
            remaining: 0
        }))
    );
}

#[test]
fn test_capacity_boundary_default_buffer() {
    let mut bus = MockTransport::new();
    bus.queue_response(&[0u8; 31]);
    let mut dev = device(&mut bus, LSB);

    assert_eq!(RegisterDevice::<&mut MockTransport>::READ_CAPACITY, 31);
    assert_eq!(dev.begin_sequential_read(0x00, 31), Ok(()));
    assert_eq!(
        dev.begin_sequential_read(0x00, 32),
        Err(Error::Contract(ContractViolation::ReadTooLong {
            requested: 32,
            capacity: 31
        }))
    );
}

#[test]
fn test_capacity_boundary_minimum_buffer() {
    let mut bus = MockTransport::new();
    bus.queue_response(&[1, 2, 3, 4, 5, 6, 7, 8]);
    let mut dev: RegisterDevice<_, 9> = RegisterDevice::new(&mut bus, addr(), MSB).unwrap();

    dev.begin_sequential_read(0x00, 8).unwrap();
    assert_eq!(dev.decode::<u64>(), Ok(0x0102_0304_0506_0708));
    assert!(matches!(
        dev.begin_sequential_read(0x00, 9),
        Err(Error::Contract(ContractViolation::ReadTooLong { .. }))
    ));
    dev.write(0x00, u64::MAX).unwrap();

    // Over-long request never reached the bus
    let requests = bus
        .events()
        .iter()
        .filter(|e| matches!(e, BusEvent::Request { .. }))
        .count();
    assert_eq!(requests, 1);
}

#[test]
fn test_undersized_buffer_rejected_at_construction() {
    let mut bus = MockTransport::new();
    let result: Result<RegisterDevice<_, 8>, _> = RegisterDevice::new(&mut bus, addr(), LSB);

    assert!(matches!(
        result,
        Err(ConfigError::CapacityTooSmall {
            capacity: 8,
            minimum: 9
        })
    ));
}

#[test]
fn test_from_config() {
    let mut bus = MockTransport::new();
    let config = DeviceConfig::new(0x1E, MSB);
    let dev: RegisterDevice<_> = RegisterDevice::from_config(&mut bus, &config).unwrap();
    assert_eq!(dev.address().get(), 0x1E);
    assert_eq!(dev.endianness(), MSB);

    let mut bus = MockTransport::new();
    let config = DeviceConfig::new(0xD0, MSB);
    let result: Result<RegisterDevice<_>, _> = RegisterDevice::from_config(&mut bus, &config);
    assert!(matches!(result, Err(ConfigError::InvalidAddress(0xD0))));
}

#[test]
fn test_transport_failure_clears_window() {
    let mut bus = MockTransport::new();
    bus.queue_response(&[0xDE, 0xAD, 0xBE, 0xEF]);
    let mut dev = device(&mut bus, MSB);

    dev.begin_sequential_read(0x00, 2).unwrap();
    assert_eq!(dev.cursor(), Cursor::window(2));

    // begin, write, end, request succeed; first read_byte fails
    dev.transport_mut().fail_at_call(4);
    assert_eq!(
        dev.begin_sequential_read(0x02, 2),
        Err(Error::Transport(MockError::Injected))
    );
    assert_eq!(dev.cursor(), Cursor::default());
    assert!(dev.decode::<u8>().is_err());
}

#[test]
fn test_transport_failure_on_address_phase() {
    let mut bus = MockTransport::new();
    bus.fail_at_call(0);
    let mut dev = device(&mut bus, LSB);

    let err = dev.read::<u32>(0x10).unwrap_err();
    assert_eq!(err, Error::Transport(MockError::Injected));
    assert!(err.is_transport());
    assert_eq!(dev.cursor(), Cursor::default());
}

#[test]
fn test_write_failure_reported() {
    let mut bus = MockTransport::new();
    bus.fail_at_call(2);
    let mut dev = device(&mut bus, LSB);

    assert_eq!(
        dev.write(0x10, 0xABCDu16),
        Err(Error::Transport(MockError::Injected))
    );
    // Handle is usable again afterwards
    assert_eq!(dev.write(0x10, 0xABCDu16), Ok(()));
}

#[test]
fn test_short_read_is_transport_failure() {
    let mut bus = MockTransport::new();
    bus.queue_response(&[0x01]);
    let mut dev = device(&mut bus, LSB);

    let err = dev.read::<u16>(0x00).unwrap_err();
    assert_eq!(
        err,
        Error::ShortRead {
            requested: 2,
            received: 1
        }
    );
    assert!(err.is_transport());
    assert!(dev.cursor().is_empty());
}

#[test]
fn test_write_drops_buffered_window() {
    let mut bus = MockTransport::new();
    bus.queue_response(&[0x01, 0x02]);
    let mut dev = device(&mut bus, LSB);

    dev.begin_sequential_read(0x00, 2).unwrap();
    dev.write(0x7F, 0xFFu8).unwrap();
    assert!(dev.decode::<u8>().is_err());
}

#[test]
fn test_tagged_read_and_write() {
    let mut bus = MockTransport::new();
    bus.queue_response(&[0xFF, 0x38, 0x00, 0x00, 0x01, 0x00]);
    let mut dev = device(&mut bus, MSB);

    assert_eq!(dev.read_kind(0x41, ValueKind::I16), Ok(Word::I16(-200)));
    dev.begin_sequential_read(0x43, 4).unwrap();
    assert_eq!(dev.decode_kind(ValueKind::U32), Ok(Word::U32(0x0000_0100)));

    bus.clear_events();
    let mut dev = device(&mut bus, LSB);
    dev.write_word(0x6B, Word::U16(0x0102)).unwrap();
    assert_eq!(bus.written(), vec![0x6B, 0x02, 0x01]);
}

#[test]
fn test_two_devices_share_one_bus() {
    let bus = RefCell::new(MockTransport::new());
    bus.borrow_mut().queue_response(&[0x00, 0x2A]);

    let imu_addr = DeviceAddress::new(0x68).unwrap();
    let mag_addr = DeviceAddress::new(0x0C).unwrap();
    let mut imu: RegisterDevice<_> =
        RegisterDevice::new(SharedTransport::new(&bus), imu_addr, MSB).unwrap();
    let mut mag: RegisterDevice<_> =
        RegisterDevice::new(SharedTransport::new(&bus), mag_addr, LSB).unwrap();

    mag.write(0x0A, 0x01u8).unwrap();
    assert_eq!(imu.read::<u16>(0x75), Ok(0x002A));

    let bus = bus.into_inner();
    assert_eq!(bus.events()[0], BusEvent::Begin(mag_addr));
    assert_eq!(bus.events()[4], BusEvent::Begin(imu_addr));
}

proptest! {
    #[test]
    fn prop_write_then_read_back(value in any::<i32>(), reg in any::<u8>(), msb_first in any::<bool>()) {
        let endianness = if msb_first { MSB } else { LSB };
        let mut bus = MockTransport::new();
        let mut dev = device(&mut bus, endianness);

        dev.write(reg, value).unwrap();
        let written = bus.written();
        prop_assert_eq!(written.len(), 5);
        prop_assert_eq!(written[0], reg);

        // Echo the payload back as the device's answer
        bus.clear_events();
        bus.queue_response(&written[1..]);
        let mut dev = device(&mut bus, endianness);
        prop_assert_eq!(dev.read::<i32>(reg), Ok(value));
    }
}
