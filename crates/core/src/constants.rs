/// Grid step of the accumulator (one day)
pub const DEFAULT_STEP_SECONDS: i64 = 24 * 3600;

/// Window start: 2020-01-11T00:00:00Z. Earlier history is premine.
pub const DEFAULT_WINDOW_START: i64 = 1_578_700_800;

/// Fixed-point scale of on-chain virtual prices
pub const VIRTUAL_PRICE_DECIMALS: u32 = 18;

/// One whole LP token in raw units, used to express diagnostic totals
pub const TOKEN_UNIT: f64 = 1e18;

pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Curve mainnet address tables.
pub mod curve {
    /// Addresses whose balances are not tracked: the zero address plus
    /// migration and farming contracts.
    pub const BURNERS: &[&str] = &[
        super::ZERO_ADDRESS,
        "0xdcb6a51ea3ca5d3fd898fd6564757c7aaec3ca92", // susdv2
        "0x13c1542a468319688b89e323fe9a3be3a90ebb27", // sbtc
        "0x13b54e8271b3e45ce71d8f4fc73ea936873a34fc", // susd (old)
        "0x0001fb050fe7312791bf6475b96569d83f695c9f", // YFI
        "0xb81d3cb2708530ea990a287142b82d058725c092", // YFII
        "0x95284d906ab7f1bd86f522078973771ecbb20662", // YFFI
        "0xd5bf26cdbd0b06d3fb0c6acd73db49d21b69e34f", // YFID
        "0x9d03A0447aa49Ab26d0229914740c18161b08386", // simp
        "0x803687e7756aff995d3053f7ce6cc41018ef62c3", // brr.apy.finance
        "0xe4ffd96b5e6d2b6cdb91030c48cc932756c951b5", // YYFI
        "0x35e3ad7652c7d5798412fea629f3e768662470cd", // xearn
    ];

    /// (swap contract, LP token, BTC denominated, label)
    pub const POOLS: &[(&str, &str, bool, &str)] = &[
        (
            "0xe5fdbab9ad428bbb469dee4cb6608c0a8895cba5",
            "0xdbe281e17540da5305eb2aefb8cef70e6db1a0a9",
            false,
            "compound1",
        ),
        (
            "0x2e60cf74d81ac34eb21eeff58db4d385920ef419",
            "0x3740fb63ab7a09891d7c0d4299442a551d06f5fd",
            false,
            "compound2",
        ),
        (
            "0xa2b47e3d5c44877cca798226b7b8118f9bfb7a56",
            "0x845838df265dcd2c412a1dc9e959c7d08537f8a2",
            false,
            "compound3",
        ),
        (
            "0x52ea46506b9cc5ef470c5bf89f17dc28bb35d85c",
            "0x9fc689ccada600b6df723d9e47d84d76664a1f23",
            false,
            "usdt",
        ),
        (
            "0x45f783cce6b7ff23b2ab2d70e416cdb7d6055f51",
            "0xdf5e0e81dff6faf3a7e52ba697820c5e32d806a8",
            false,
            "y",
        ),
        (
            "0x79a8c46dea5ada233abaffd40f3a0a2b1e5a4f27",
            "0x3b3ac5386837dc563660fb6a0937dfaa5924333b",
            false,
            "busd",
        ),
        (
            "0xedf54bc005bc2df0cc6a675596e843d28b16a966",
            "0x2b645a6a426f22fb7954dc15e583e3737b8d1434",
            false,
            "susd-old",
        ),
        (
            "0xa5407eae9ba41422680e2e00537571bcc53efbfd",
            "0xc25a3a3b969415c80451098fa907ec722572917f",
            false,
            "susdv2",
        ),
        (
            "0x06364f10b501e868329afbc005b3492902d6c763",
            "0xd905e2eaebe188fc92179b6350807d8bd91db0d8",
            false,
            "pax",
        ),
        (
            "0x93054188d876f558f4a66b2ef1d97d16edf0895b",
            "0x49849c98ae39fff122806c06791fa73784fb3675",
            true,
            "ren",
        ),
        (
            "0x7fc77b5c7614e1533320ea6ddc2eb61fa00a9714",
            "0x075b1bb99792c9e1041ba13afef80c91a1e70fb3",
            true,
            "sbtc",
        ),
    ];
}
