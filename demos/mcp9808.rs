#![cfg_attr(all(target_arch = "arm", target_os = "none"), no_std)]
#![cfg_attr(all(target_arch = "arm", target_os = "none"), no_main)]

#[cfg(not(all(target_arch = "arm", target_os = "none")))]
fn main() {
    println!("unsupported target");
}

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod arm {
    use defmt::*;
    use defmt_rtt as _;
    use fugit::RateExtU32;
    use panic_probe as _;
    use rp2040_hal::{
        clocks::{init_clocks_and_plls, Clock},
        entry,
        gpio::{FunctionI2C, Pin, PullUp},
        i2c::I2C,
        pac,
        sio::Sio,
        watchdog::Watchdog,
    };

    use unofficial_mcp9808::{
        AlertEnable, AlertOutputMode, AlertPolarity, AlertResponseMode, Driver, Hysteresis,
        LockState, Mcp9808, PowerMode, Resolution, DEFAULT_ADDRESS,
    };

    #[link_section = ".boot2"]
    #[used]
    pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

    #[entry]
    fn main() -> ! {
        let mut pac = pac::Peripherals::take().unwrap();
        let core = pac::CorePeripherals::take().unwrap();
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let external_xtal_freq_hz = 12_000_000u32;
        let clocks = init_clocks_and_plls(
            external_xtal_freq_hz,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let pins = rp2040_hal::gpio::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let sda: Pin<_, FunctionI2C, PullUp> = pins.gpio8.reconfigure();
        let scl: Pin<_, FunctionI2C, PullUp> = pins.gpio9.reconfigure();
        let i2c = I2C::i2c0(
            pac.I2C0,
            sda,
            scl,
            400.kHz(),
            &mut pac.RESETS,
            &clocks.system_clock,
        );

        let mut delay = cortex_m::delay::Delay::new(core.SYST, clocks.system_clock.freq().to_Hz());

        let mut mcp9808 = Mcp9808::new(i2c, DEFAULT_ADDRESS).unwrap().init().unwrap();

        mcp9808.set_resolution(Resolution::Quarter).unwrap();
        mcp9808.set_power_mode(PowerMode::Continuous).unwrap();
        mcp9808
            .set_alert_output_mode(AlertOutputMode::Interrupt)
            .unwrap();
        mcp9808.set_polarity(AlertPolarity::ActiveLow).unwrap();
        mcp9808
            .set_alert_response_mode(AlertResponseMode::UpperLowerCrit)
            .unwrap();
        mcp9808.set_upper_lower_threshold(32.5, 20.5).unwrap();
        mcp9808.set_crit_threshold(35.5).unwrap();
        mcp9808.set_alert_hysteresis(Hysteresis::OneAndAHalf).unwrap();
        mcp9808.set_alert_enable(AlertEnable::Enabled).unwrap();
        mcp9808.set_lock_state(LockState::Unlocked).unwrap();
        // interrupt mode needs one clear after the alert is enabled
        mcp9808.clear_interrupt().unwrap();

        loop {
            let temperature = mcp9808.temperature().unwrap();
            println!("{} °C", temperature);
            if mcp9808.config().unwrap().alert_status() {
                mcp9808.clear_interrupt().unwrap();
                println!("temperature state changed");
            }
            delay.delay_ms(1000);
        }
    }
}
