#![no_std]
#![no_main]

use defmt::{error, info, trace, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART1;
use embassy_rp::pwm::Pwm;
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_time::{Delay, Duration, Ticker};
use gimbal_proto::SENSOR_BAUDRATE;
use gimbal_rp2040::{
    servo_pwm_config, ChannelTiming, CommandChannel, ControlLoop, CoordinateCell,
    CoordinateIntake, PwmServoOutput, SerialLink, UartLink, CONTROL_PERIOD_MS, DEFAULT_CONFIG,
    DEFAULT_TIMING, SERVO_PARAMS_CMD, STARTUP_READ_TIMEOUT_MS,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
});

/// Latest target coordinate, written by the stream task, read by the
/// control task.
static TARGET: CoordinateCell = CoordinateCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Gimbal starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = SENSOR_BAUDRATE;

    let uart = Uart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let mut link = UartLink::new(uart);

    // --- Servo Setup ---
    let pwm_config = servo_pwm_config();
    let pwm = Pwm::new_output_ab(p.PWM_SLICE0, p.PIN_16, p.PIN_17, pwm_config.clone());
    let mut control = ControlLoop::new(PwmServoOutput::new(pwm, pwm_config), DEFAULT_CONFIG);

    let mut led = Output::new(p.PIN_25, Level::Low);

    // --- Startup exchanges, while the UART is still ours ---
    let timing = ChannelTiming {
        read_timeout_ms: Some(STARTUP_READ_TIMEOUT_MS),
        ..DEFAULT_TIMING
    };
    let mut channel = CommandChannel::new(&mut link, Delay, timing);

    match channel.handshake().await {
        Ok(()) => match channel.query_servo_params(SERVO_PARAMS_CMD).await {
            Ok(params) => info!(
                "Sensor reports base {} deg, arm {} deg",
                params.base_angle, params.arm_angle
            ),
            Err(e) => warn!("Servo parameter query failed: {:?}", e),
        },
        Err(e) => {
            error!("Sensor self-check failed: {:?}", e);
            led.set_high();
        }
    }

    match control.home() {
        Ok(pulses) => info!("Servos homed at {}/{}", pulses.pan, pulses.tilt),
        Err(e) => error!("Homing failed: {:?}", e),
    }

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(stream_task(link, led).unwrap());
    spawner.spawn(control_task(control).unwrap());

    info!("Gimbal initialized, tracking...");
}

/// Stream task - feeds every received byte to the coordinate receiver.
#[embassy_executor::task]
async fn stream_task(mut link: UartLink<'static>, mut led: Output<'static>) {
    let mut intake = CoordinateIntake::new(&TARGET);
    loop {
        match link.read_byte().await {
            Ok(byte) => {
                if intake.on_byte(byte) {
                    trace!("Target published");
                }
            }
            Err(e) => {
                warn!("UART error: {:?}", e);
                // Toggle LED to indicate error
                led.toggle();
            }
        }
    }
}

/// Control task - runs one control step per servo period.
#[embassy_executor::task]
async fn control_task(mut control: ControlLoop<PwmServoOutput<'static>>) {
    let mut ticker = Ticker::every(Duration::from_millis(CONTROL_PERIOD_MS));
    loop {
        ticker.next().await;
        if let Err(e) = control.poll(&TARGET) {
            error!("Servo output error: {:?}", e);
        }
    }
}
