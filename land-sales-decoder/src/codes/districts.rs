//! Local government district codes and council names

pub(crate) const DISTRICTS: &[(&str, &str)] = &[
    ("050", "ALBURY"),
    ("257", "ARMIDALE REGIONAL"),
    ("148", "BALLINA"),
    ("230", "BALRANALD"),
    ("608", "BATHURST REGIONAL"),
    ("276", "BAYSIDE"),
    ("018", "BEGA VALLEY"),
    ("149", "BELLINGEN"),
    ("051", "BERRIGAN"),
    ("214", "BLACKTOWN"),
    ("231", "BLAND"),
    ("118", "BLAYNEY"),
    ("216", "BLUE MOUNTAINS"),
    ("232", "BOGAN"),
    ("239", "BOURKE"),
    ("233", "BREWARRINA"),
    ("234", "BROKEN HILL"),
    ("137", "BURWOOD"),
    ("150", "BYRON"),
    ("109", "CABONNE"),
    ("217", "CAMDEN"),
    ("218", "CAMPBELLTOWN"),
    ("139", "CANADA BAY"),
    ("258", "CANTERBURY-BANKSTOWN"),
    ("052", "CARRATHOOL"),
    ("259", "CENTRAL COAST"),
    ("235", "CENTRAL DARLING"),
    ("001", "CESSNOCK"),
    ("260", "CITY OF PARRAMATTA"),
    ("708", "CITY OF SYDNEY"),
    ("303", "CLARENCE VALLEY"),
    ("236", "COBAR"),
    ("152", "COFFS HARBOUR"),
    ("054", "COOLAMON"),
    ("238", "COONAMBLE"),
    ("042", "COWRA"),
    ("261", "CUMBERLAND"),
    ("275", "DUBBO REGIONAL"),
    ("002", "DUNGOG"),
    ("262", "EDWARD RIVER"),
    ("097", "EUROBODALLA"),
    ("220", "FAIRFIELD"),
    ("263", "FEDERATION"),
    ("117", "FORBES"),
    ("264", "GEORGES RIVER"),
    ("265", "COOTAMUNDRA-GUNDAGAI REGIONAL"),
    ("240", "GILGANDRA"),
    ("302", "GLEN INNES SEVERN"),
    ("529", "GOULBURN MULWAREE"),
    ("560", "GREATER HUME"),
    ("074", "GRIFFITH"),
    ("187", "GUNNEDAH"),
    ("300", "GWYDIR"),
    ("219", "HAWKESBURY"),
    ("243", "HAY"),
    ("266", "HILLTOPS"),
    ("082", "HORNSBY"),
    ("083", "HUNTERS HILL"),
    ("267", "INNER WEST"),
    ("188", "INVERELL"),
    ("061", "JUNEE"),
    ("157", "KEMPSEY"),
    ("098", "KIAMA"),
    ("084", "KU-RING-GAI"),
    ("158", "KYOGLE"),
    ("244", "LACHLAN"),
    ("004", "LAKE MACQUARIE"),
    ("085", "LANE COVE"),
    ("065", "LEETON"),
    ("159", "LISMORE"),
    ("222", "LITHGOW"),
    ("223", "LIVERPOOL"),
    ("301", "LIVERPOOL PLAINS"),
    ("066", "LOCKHART"),
    ("005", "MAITLAND"),
    ("620", "MID WESTERN REGIONAL"),
    ("268", "MID-COAST"),
    ("192", "MOREE PLAINS"),
];
