//! 内置描述表：变量名 / 结构字段名 → 俄文描述。

pub(crate) const BUILTIN_DESCRIPTIONS: &[(&str, &str)] = &[
    // GLOBAL
    ("ICUR_PRECENT", "Коэффициент использования установленной мощности (в процентах)"),
    ("rElectricityMeter", "Раход электроэнергии"),
    ("EFFICIENCY_LIMIT_RATE", "Коэффицент ограничения производительности (0-1)"),
    ("ANNUNCIATOR_LIGHT_HZ", "Световая индикация Гц"),
    ("VFD_SMOOTH_SET_FREQUENCY", "Опция плавного задания частоты"),
    ("VFD_FREQUENCY_SYNC_TOLERANCE", "Допустимая разница частот для синхронизации моторов"),
    ("MOTOR_FREQUENCY_CONVEYOR", "Частота мотора конвейера"),
    ("MOTOR_FREQUENCY_DUMPER_CONVEYOR", "Частота мотора конвейера отвалообразователя"),
    ("MOTOR_FREQUENCY_DUMPER_ROTATION", "Частота мотора поворота отвалообразователя"),
    ("CONVEYOR_DEAFULT_SPEED", "Скорость конвейера"),
    ("BUNKER_WORK_PRECENT_1", "Уставка пропорции шихтования для бункера 1"),
    ("BUNKER_WORK_PRECENT_2", "Уставка пропорции шихтования для бункера 2"),
    ("BUNKER_WORK_PRECENT_3", "Уставка пропорции шихтования для бункера 3"),
    (
        "BUNKER_MINIMAL_WEIGHT",
        "Уставка минимального веса бункера. Результат <= считывается алгоритмом как пустой бункер.",
    ),
    // ST_AlarmSetpoints（所有 *_POINTS 共用）
    ("LL_Value", "Уставка Low-Low"),
    ("L_Value", "Уставка Low"),
    ("H_Value", "Уставка High"),
    ("HH_Value", "Уставка High-High"),
    // ST_BunkerVibratorSettings
    ("TIME_ACTIVE", "Время активной работы вибратора"),
    ("TIME_PAUSE_VIBRATOR", "Время паузы вибратора между циклами"),
    ("TIME_PAUSE_FB", "Время паузы ФБ между подходами"),
    (
        "TIME_WAITING_FEEDBACK",
        "Таймер ожидания пропавшего сигнала обратной связи работы механизма",
    ),
    ("PNEUMATIC_COLLAPSE_TIME", "Уставка времени таймера пневмообрушения"),
    // ST_PreStartAlarmSettings
    ("OPTION_ENABLE", "Опция на включение ППЗ в алгоритм"),
    ("TIME_FIRST_SIGNAL", "Время звучания первого сигнала"),
    ("TIME_FIRST_SIGNAL_PAUSE", "Пауза после первого сигнала"),
    ("TIME_SECOND_SIGNAL", "Время звучания второго сигнала"),
    ("TIME_SECOND_SIGNAL_PAUSE", "Пауза после втотрого сигнала"),
    // ST_Commands
    ("cmdResetAll", "Сброс всех ошибок"),
    ("cmdStartCommon", "Команда общего пуска"),
    ("cmdStopCommon", "Команда общего останова"),
    ("cmdEmergencyStopCommon", "Команда общей аварийной остановки"),
    // ST_CommonSignals
    ("fbEmergencyStopBtn", "Кнопка \"Аварийная остановка\""),
    ("fbRemoteModeBtn", "Режим работы ( 1 - дистанционный, 0 - местный)"),
    ("fbRealyCurrentControl", "Реле контроля фаз"),
    ("fbQF1", "Состояние автомат. выключателя (1 - включен, 0 - выключен)"),
    ("fb9QF1", "Состояние автомат. выключателя (1 - включен, 0 - выключен)"),
    ("fb10QF1", "Состояние автомат. выключателя (1 - включен, 0 - выключен)"),
    ("fb11QF1", "Состояние автомат. выключателя (1 - включен, 0 - выключен)"),
    ("qx6KM1", "Контактор 6KM1"),
    // MAIN 局部变量
    ("xStateAutoWorking", "Система полностью запущена и работает в автоматическом режиме"),
    ("xStateEmergencyStop", "Система была аварийно остановлена"),
    ("xStateErrorCheckReady", "Проверки стадии готовности к пуску провалились"),
    (
        "xStateErrorAcceptIdle",
        "Невозможно принять коэффицент шихтования по заданию оператора - сумма коэффицентов не равна 100",
    ),
    // ST_Bunker
    ("rWeight", "Весы бункера"),
    ("rProportionActual", "Пропорция от веса"),
    ("rMotorVibFeederCommonFrequency", "Частота двух моторов вибропитателя"),
    ("cmdDumpingPrecent", "Задание процентного соотношения сбрасывания"),
    ("xStateWarning", "Программное предупреждение"),
    ("xStateFailure", "Программная ошибка"),
    ("fbStateHatch", "Положение люка (1 - закрыт , 0 - открыт )"),
    ("qxLightRed", "Красный сигнал светофора"),
    ("qxLightYellow", "Желтый сигнал светофора"),
    ("qxLightGreen", "Зеленый сигнал светофора"),
    ("fbBtnStart", "Кнопка \"Пуск питателя\" NO"),
    ("fbBtnStop", "Кнопка \"Стоп питателя\" NO"),
    ("fbBtnEmergencyStop", "Кнопка \"Аварийная остановка\" NC"),
    ("cmdStartFeeder", "Команда \"Пуск питателя\""),
    ("cmdStopFeeder", "Команда \"Стоп питателя\""),
    ("cmdEmergencyStopFeeder", "Команда \"Аварийная остановка\""),
    ("cmdReset", "Сброс ошибок"),
    // ST_VFD
    ("qrOutFrequency", "Выходная частота"),
    ("rActualFrequency", "Текущая частота ЧРП"),
    ("wMotorCurrent", "Ток эл. двигателя"),
    ("cmdSetFrequency", "Ручное задание частоты"),
    // ST_MotorVibFeeder
    ("rTempBearing", "Температура подшипникового узла (в °C)"),
    // ST_Dumper / ST_ConveyorBasic / ST_ConveyorPrefabricated
    ("xStateEnable", "Механизм полностью запущен"),
    ("xStateStarting", "Процесс запуска (вместе с ППЗ)"),
    ("xHLA", "Световая сигнализация"),
    ("xSoundAlarm", "Звуковая сигнализация"),
    ("fbYE1", "Обнаружение металла (металлодетектор)"),
    ("cmdStartConveyor", "Команда пуска конвейера"),
    ("cmdStopConveyor", "Команда останова конвейера"),
    ("cmdEmergencyStop", "Команда аварийной остановки"),
    ("cmdTurnLeft", "Команда поворота влево"),
    ("cmdTurnRight", "Команда поворота вправо"),
    ("fbBtnTurnLeft", "Кнопка поворота влево"),
    ("fbBtnTurnRight", "Кнопка поворота вправо"),
    ("fbEndSwitchRight", "Концевой выключатель правого положения"),
    ("fbEndSwitchLeft", "Концевой выключатель левого положения"),
    ("fbBtnRemoteMode", "Кнопка режима"),
    ("SIMULATION", "Режим симуляции"),
];
